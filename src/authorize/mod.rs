//! # Authorization Module
//!
//! Interactive authorization per streaming service. An [`Authorizer`] is only
//! consulted when no user token is cached for its service; whatever token it
//! returns is persisted by the caller.
//!
//! - [`MusicKitAuthorizer`] hands the user over to the Apple Music SDK page in
//!   the system browser and waits for the music user token on a local
//!   callback server.
//! - [`ProvidedTokenAuthorizer`] returns a token obtained outside this
//!   application. Spotify uses it: its authorization protocol is not part of
//!   this application.

mod musickit;
mod provided;

use async_trait::async_trait;

use crate::{error::AppResult, types::Service};

pub use musickit::{BrowserLauncher, MusicKitAuthorizer};
pub use provided::ProvidedTokenAuthorizer;

#[async_trait]
pub trait Authorizer: Send + Sync {
    fn service(&self) -> Service;

    /// Runs the interactive authorization and returns the user token.
    async fn authorize(&self) -> AppResult<String>;
}
