use crate::{
    cli::build_controller,
    ui::{TerminalUi, UiAdapter},
};

pub async fn welcome() {
    let mut controller = build_controller(TerminalUi::new(), None);
    let message = controller.session_mut().get_cached_welcome_message().await;
    controller.ui_mut().show_welcome(&message);
}
