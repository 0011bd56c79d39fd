use crate::{
    cli::build_controller,
    types::Service,
    ui::{TerminalUi, UiAdapter},
};

/// Migrates the given Spotify playlist ids, or asks which ones when none are
/// given.
pub async fn migrate(playlist_ids: Vec<String>) {
    let ui = if playlist_ids.is_empty() {
        TerminalUi::new()
    } else {
        TerminalUi::new().with_selection(playlist_ids.clone())
    };
    let mut controller = build_controller(ui, None);

    {
        let (session, ui) = controller.parts_mut();
        if !session.refresh_migrate_button_visibility(ui).await {
            ui.show_error("Log in to Spotify and Apple Music before migrating.");
            return;
        }
        if playlist_ids.is_empty() {
            session.show_playlists(Service::Spotify, ui).await;
        }
    }

    controller.migrate().await;
}
