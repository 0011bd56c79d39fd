use crate::{
    cli::build_controller,
    success,
    types::Service,
    ui::{TerminalUi, UiAdapter},
};

/// Authorizes `service` unless a token is cached, then lists its playlists.
///
/// A `token` takes the place of the interactive authorization and is cached
/// as the service's user token. An already cached token wins; `logout` first
/// to replace it.
pub async fn login(service: Service, token: Option<String>) {
    let mut controller = build_controller(TerminalUi::new(), token.map(|t| (service, t)));
    controller.login(service).await;
}

pub async fn logout(service: Service) {
    let mut controller = build_controller(TerminalUi::new(), None);
    let (session, ui) = controller.parts_mut();
    match session.forget_token(service, ui).await {
        Ok(()) => success!("Logged out of {}.", service),
        Err(e) => ui.show_error(&format!("Failed to log out of {}: {}", service, e)),
    }
}
