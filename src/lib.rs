//! Playlist Migration CLI Library
//!
//! This library drives the migration of playlists from Spotify to Apple Music.
//! It caches per-service user tokens, authorizes the user where no token is
//! cached, lists playlists through the migration backend, and submits the
//! migration request for the selected playlists.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints of the local authorization callback server
//! - `authorize` - Interactive authorization per streaming service
//! - `backend` - Client for the migration backend REST API
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `controller` - Session state and the command handlers
//! - `error` - Error type shared by the controller operations
//! - `management` - Persistent key-value store, token and message caches
//! - `server` - Local HTTP server for authorization callbacks
//! - `types` - Data structures and type definitions
//! - `ui` - UI adapter interface and the terminal implementation
//! - `utils` - Utility functions and helpers

pub mod api;
pub mod authorize;
pub mod backend;
pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod management;
pub mod server;
pub mod types;
pub mod ui;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used by the top-level plumbing (configuration loading, the binary) where
/// any error is reported and not inspected further. Controller operations use
/// [`error::AppError`] instead.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Loading {} playlists...", service);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Apple Music user authorized successfully.");
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only for failures the program cannot continue from, such as an unusable
/// configuration at startup. Errors raised by user actions go through the UI
/// error slot instead.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// # Example
///
/// ```
/// warning!("Failed to open browser. Please navigate to {}", url);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a dimmed diagnostic message when `PLMCLI_DEBUG` is set.
///
/// # Example
///
/// ```
/// debug!("{} user token found in cache.", service);
/// ```
#[macro_export]
macro_rules! debug {
  ($($arg:tt)*) => ({
    if $crate::config::debug_enabled() {
      use colored::Colorize;
      println!("[{}] {}", "~".dimmed(), std::format!($($arg)*).dimmed());
    }
  })
}
