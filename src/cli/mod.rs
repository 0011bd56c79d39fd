//! # CLI Module
//!
//! Command-line layer of the migration controller. Every command builds a
//! [`Controller`] over the persistent store, the configured backend and the
//! terminal UI, and runs one controller operation.
//!
//! ## Commands
//!
//! - [`welcome`] - Shows the (cached) welcome message
//! - [`status`] - Shows which services are logged in and whether migrating is possible
//! - [`login`] / [`logout`] - Authorizes a service, or forgets its token
//! - [`playlists`] - Lists the playlists of a service
//! - [`migrate`] - Migrates selected Spotify playlists to Apple Music
//! - [`interactive`] - The whole page flow as a terminal menu

mod interactive;
mod login;
mod migrate;
mod playlists;
mod status;
mod welcome;

use std::sync::Arc;

use crate::{
    authorize::{Authorizer, MusicKitAuthorizer, ProvidedTokenAuthorizer},
    backend::{Backend, HttpBackend},
    controller::{Controller, Session},
    management::FileStore,
    types::Service,
    ui::TerminalUi,
};

pub use interactive::interactive;
pub use login::login;
pub use login::logout;
pub use migrate::migrate;
pub use playlists::playlists;
pub use status::status;
pub use welcome::welcome;

/// Session over the local store and the configured backend.
///
/// `token_override` replaces the interactive authorization of its service
/// with the given token.
fn build_session(token_override: Option<(Service, String)>) -> Session {
    let backend: Arc<dyn Backend> = Arc::new(HttpBackend::from_env());

    let mut authorizers: Vec<Box<dyn Authorizer>> = vec![
        Box::new(ProvidedTokenAuthorizer::spotify_from_env()),
        Box::new(MusicKitAuthorizer::from_env(Arc::clone(&backend))),
    ];
    if let Some((service, token)) = token_override {
        authorizers.push(Box::new(ProvidedTokenAuthorizer::new(service, Some(token))));
    }

    authorizers.into_iter().fold(
        Session::new(Box::new(FileStore::default_location()), backend),
        |session, authorizer| session.with_authorizer(authorizer),
    )
}

fn build_controller(ui: TerminalUi, token_override: Option<(Service, String)>) -> Controller<TerminalUi> {
    Controller::new(build_session(token_override), ui)
}
