//! Configuration management for the playlist migration CLI.
//!
//! Configuration values come from environment variables and a `.env` file in
//! the local data directory. Environment variables take priority over the
//! `.env` file, and every value except the Spotify user token has a default,
//! so a missing `.env` file is not an error.

use std::{env, net::SocketAddr, path::PathBuf, str::FromStr, time::Duration};

/// Default base URL of the migration backend.
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8001";

/// Default bind address for the authorization callback server.
pub const DEFAULT_CALLBACK_ADDRESS: &str = "127.0.0.1:8899";

/// Default number of seconds to wait for an authorization callback.
pub const DEFAULT_AUTH_TIMEOUT_SECS: u64 = 120;

/// Name and build reported to the Apple Music SDK page.
pub const DEFAULT_APP_NAME: &str = "plmcli";
pub const APP_BUILD: &str = env!("CARGO_PKG_VERSION");

/// Loads environment variables from a `.env` file in the local data directory.
///
/// The file is looked up in:
/// - Linux: `~/.local/share/plmcli/.env`
/// - macOS: `~/Library/Application Support/plmcli/.env`
/// - Windows: `%LOCALAPPDATA%/plmcli/.env`
///
/// The parent directory is created if needed. A missing file is fine; a file
/// that exists but cannot be parsed is reported as an error.
pub async fn load_env() -> crate::Res<()> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    if path.is_file() {
        dotenv::from_path(&path)?;
    }
    Ok(())
}

/// Root directory for everything this application stores locally.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("plmcli");
    path
}

/// Base URL of the migration backend, without a trailing slash.
///
/// Read from `PLMCLI_BACKEND_URL`, defaulting to [`DEFAULT_BACKEND_URL`].
pub fn backend_url() -> String {
    env::var("PLMCLI_BACKEND_URL")
        .unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string())
        .trim_end_matches('/')
        .to_string()
}

/// URL of the page that hosts the Apple Music SDK authorization.
///
/// Read from `PLMCLI_AUTH_PAGE_URL`, defaulting to `<backend>/musickit-auth`.
pub fn auth_page_url() -> String {
    env::var("PLMCLI_AUTH_PAGE_URL").unwrap_or_else(|_| format!("{}/musickit-auth", backend_url()))
}

/// Address the authorization callback server binds to.
///
/// Read from `PLMCLI_CALLBACK_ADDRESS`. An unparsable value falls back to
/// [`DEFAULT_CALLBACK_ADDRESS`] with a warning.
pub fn callback_addr() -> SocketAddr {
    let fallback = || {
        SocketAddr::from_str(DEFAULT_CALLBACK_ADDRESS)
            .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], 8899)))
    };

    match env::var("PLMCLI_CALLBACK_ADDRESS") {
        Ok(value) => SocketAddr::from_str(&value).unwrap_or_else(|e| {
            crate::warning!("Invalid PLMCLI_CALLBACK_ADDRESS {}: {}", value, e);
            fallback()
        }),
        Err(_) => fallback(),
    }
}

/// How long to wait for the authorization callback before giving up.
pub fn auth_timeout() -> Duration {
    let secs = env::var("PLMCLI_AUTH_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(DEFAULT_AUTH_TIMEOUT_SECS);
    Duration::from_secs(secs)
}

/// Application name passed to the Apple Music SDK page.
pub fn app_name() -> String {
    env::var("PLMCLI_APP_NAME").unwrap_or_else(|_| DEFAULT_APP_NAME.to_string())
}

/// Spotify user token supplied from outside this application, if any.
pub fn spotify_user_token() -> Option<String> {
    env::var("SPOTIFY_USER_TOKEN")
        .ok()
        .filter(|token| !token.is_empty())
}

/// Whether diagnostic output is enabled through `PLMCLI_DEBUG`.
pub fn debug_enabled() -> bool {
    env::var("PLMCLI_DEBUG")
        .map(|v| !v.is_empty() && v != "0" && v != "false")
        .unwrap_or(false)
}
