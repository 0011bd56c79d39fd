//! # Migration Backend Module
//!
//! Client side of the migration backend REST API. The backend owns the actual
//! work (developer token signing, reading playlists from each service,
//! recreating playlists in Apple Music); this module only moves JSON back and
//! forth.
//!
//! ## Endpoints
//!
//! | Endpoint | Method | Response |
//! |---|---|---|
//! | `/api/developer-token` | GET | `{token}` |
//! | `/api/welcome-message` | GET | `{response}` |
//! | `/api/spotify-playlists` | GET | `[{id, name}]` |
//! | `/api/applemusic-playlists` | GET | `[{id, name}]` |
//! | `/api/migrate-playlists` | POST | implementation-defined JSON |
//!
//! A non-success HTTP status is the only failure signal the backend gives;
//! it surfaces as [`AppError::Http`](crate::error::AppError::Http).
//!
//! The [`Backend`] trait is the seam the controller depends on, so handlers
//! can run against a fake in tests. [`HttpBackend`] is the reqwest
//! implementation used by the CLI.

mod http;

use async_trait::async_trait;
use serde_json::Value;

use crate::{
    error::AppResult,
    types::{MigrateRequest, Playlist, Service},
};

pub use http::HttpBackend;

#[async_trait]
pub trait Backend: Send + Sync {
    /// Developer token consumed by the Apple Music SDK configuration.
    async fn developer_token(&self) -> AppResult<String>;

    async fn welcome_message(&self) -> AppResult<String>;

    async fn playlists(&self, service: Service) -> AppResult<Vec<Playlist>>;

    /// Requests migration of `request.playlists` into the destination service
    /// and returns the backend's result object untouched.
    async fn migrate(&self, request: &MigrateRequest) -> AppResult<Value>;
}
