use crate::{cli::build_controller, types::Service, ui::TerminalUi};

pub async fn playlists(service: Service) {
    let mut controller = build_controller(TerminalUi::new(), None);
    let (session, ui) = controller.parts_mut();
    session.show_playlists(service, ui).await;
}
