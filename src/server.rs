use axum::{Extension, Router, routing::get};
use std::sync::Arc;
use tokio::{net::TcpListener, sync::Mutex};

use crate::{api, types::AuthorizationState};

pub fn router(state: Arc<Mutex<Option<AuthorizationState>>>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback).layer(Extension(state)))
}

/// Serves the callback endpoints on an already bound listener until the task
/// running it is aborted.
pub async fn start_api_server(
    listener: TcpListener,
    state: Arc<Mutex<Option<AuthorizationState>>>,
) -> std::io::Result<()> {
    axum::serve(listener, router(state)).await
}
