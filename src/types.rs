use std::fmt;

use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// A streaming service taking part in the migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
pub enum Service {
    Spotify,
    AppleMusic,
}

impl Service {
    pub const ALL: [Service; 2] = [Service::Spotify, Service::AppleMusic];

    /// Key under which the user token for this service is persisted.
    pub fn token_key(&self) -> &'static str {
        match self {
            Service::Spotify => "SpotifyUserToken",
            Service::AppleMusic => "AppleMusicUserToken",
        }
    }

    /// Backend path listing the user's playlists on this service.
    pub fn playlists_path(&self) -> &'static str {
        match self {
            Service::Spotify => "/api/spotify-playlists",
            Service::AppleMusic => "/api/applemusic-playlists",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Service::Spotify => "Spotify",
            Service::AppleMusic => "Apple Music",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
}

#[derive(Tabled)]
pub struct PlaylistTableRow {
    #[tabled(rename = "#")]
    pub index: usize,
    #[tabled(rename = "[x]")]
    pub checked: String,
    pub name: String,
    pub id: String,
}

/// A selectable entry produced from a playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkbox {
    pub element_id: String,
    pub value: String,
    pub label: String,
}

/// A welcome message together with the moment it stops being valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedMessage {
    pub message: String,
    pub expiry_ms: i64,
}

impl CachedMessage {
    pub fn is_valid_at(&self, now_ms: i64) -> bool {
        now_ms < self.expiry_ms
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeveloperTokenResponse {
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WelcomeMessageResponse {
    pub response: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrateRequest {
    pub user_token: String,
    pub playlists: Vec<String>,
}

#[derive(Tabled)]
pub struct StatusTableRow {
    pub service: String,
    pub status: String,
}

/// How an interactive authorization ended, as reported to the callback server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationOutcome {
    Authorized(String),
    Declined(String),
}

/// Authorization in progress, shared between the callback server and the
/// task waiting for its result.
#[derive(Debug, Clone)]
pub struct AuthorizationState {
    pub state: String,
    pub outcome: Option<AuthorizationOutcome>,
}

impl AuthorizationState {
    pub fn new(state: String) -> Self {
        Self {
            state,
            outcome: None,
        }
    }
}
