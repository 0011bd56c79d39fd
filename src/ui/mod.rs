//! UI adapter interface.
//!
//! The controller never touches a concrete UI toolkit. It registers handlers
//! against controls with [`UiAdapter::on_click`], pulls the handlers of
//! clicked controls with [`UiAdapter::next_handler`], and pushes state back
//! through the display operations. [`TerminalUi`] is the implementation the
//! CLI runs with.

mod terminal;

use async_trait::async_trait;

use crate::types::{Checkbox, Service};

pub use terminal::TerminalUi;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    SpotifyLogin,
    AppleMusicLogin,
    MigrateButton,
}

impl Control {
    pub fn login(service: Service) -> Self {
        match service {
            Service::Spotify => Control::SpotifyLogin,
            Service::AppleMusic => Control::AppleMusicLogin,
        }
    }

    /// Service a login control belongs to.
    pub fn service(&self) -> Option<Service> {
        match self {
            Control::SpotifyLogin => Some(Service::Spotify),
            Control::AppleMusicLogin => Some(Service::AppleMusic),
            Control::MigrateButton => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Control::SpotifyLogin => "Log in to Spotify",
            Control::AppleMusicLogin => "Log in to Apple Music",
            Control::MigrateButton => "Migrate selected playlists",
        }
    }
}

/// Command run when a control is clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    Login(Service),
    Migrate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginState {
    LoggedOut,
    /// The login control no longer authorizes and is relabeled.
    LoggedIn,
}

/// Where a playlist list is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaylistTarget {
    /// Source playlists, which the user selects from.
    Source,
    /// Playlists already in the destination service.
    Destination,
}

impl PlaylistTarget {
    pub fn for_service(service: Service) -> Self {
        match service {
            Service::Spotify => PlaylistTarget::Source,
            Service::AppleMusic => PlaylistTarget::Destination,
        }
    }
}

#[async_trait]
pub trait UiAdapter: Send {
    /// Binds `handler` to clicks on `control`, replacing any earlier binding.
    fn on_click(&mut self, control: Control, handler: Handler);

    /// Waits for the user to click a bound control. `None` ends the session.
    async fn next_handler(&mut self) -> Option<Handler>;

    fn set_login_state(&mut self, service: Service, state: LoginState);

    fn set_migrate_visible(&mut self, visible: bool);

    fn show_welcome(&mut self, message: &str);

    /// Shows `message` in the single error slot, replacing what was there.
    fn show_error(&mut self, message: &str);

    fn show_success(&mut self, message: &str);

    /// Replaces everything shown in `target` with `checkboxes`.
    fn render_playlists(&mut self, target: PlaylistTarget, checkboxes: &[Checkbox]);

    fn show_playlist_selection(&mut self);

    /// Ids of the source playlists the user has checked.
    async fn selected_playlist_ids(&mut self) -> Vec<String>;
}
