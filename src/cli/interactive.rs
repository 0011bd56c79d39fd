use crate::{cli::build_controller, ui::TerminalUi};

pub async fn interactive() {
    let mut controller = build_controller(TerminalUi::new(), None);
    controller.run().await;
}
