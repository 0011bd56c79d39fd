use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};
use tokio::sync::Mutex;

use crate::{
    types::{AuthorizationOutcome, AuthorizationState},
    warning,
};

/// Receives the result of the Apple Music SDK authorization page.
///
/// Expects `state` plus either `music_user_token` or `error`. The outcome is
/// recorded in the shared state for the waiting authorizer; a request with a
/// wrong `state` is ignored.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(shared_state): Extension<Arc<Mutex<Option<AuthorizationState>>>>,
) -> Html<&'static str> {
    let mut state = shared_state.lock().await;
    let Some(auth_state) = state.as_mut() else {
        return Html("<h4>No authorization in progress.</h4>");
    };

    if params.get("state") != Some(&auth_state.state) {
        warning!("Ignoring authorization callback with unexpected state.");
        return Html("<h4>Invalid authorization state.</h4>");
    }

    if let Some(token) = params.get("music_user_token").filter(|t| !t.is_empty()) {
        auth_state.outcome = Some(AuthorizationOutcome::Authorized(token.clone()));
        Html("<h2>Authorization successful.</h2><p>Close browser window.</p>")
    } else if let Some(reason) = params.get("error") {
        auth_state.outcome = Some(AuthorizationOutcome::Declined(reason.clone()));
        Html("<h4>Authorization declined.</h4>")
    } else {
        Html("<h4>Missing music user token.</h4>")
    }
}
