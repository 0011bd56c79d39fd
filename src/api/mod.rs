//! Endpoints of the local authorization callback server.
//!
//! - `GET /health` reports that the server is up
//! - `GET /callback` receives the outcome of the Apple Music authorization page

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
