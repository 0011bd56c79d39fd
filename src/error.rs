use reqwest::StatusCode;

use crate::types::Service;

/// Errors raised by the controller operations.
///
/// Every variant is recoverable: handlers catch it, log it and show it in the
/// UI error slot, and the user may retry the action.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Backend request to {path} failed with status {status}")]
    Http { path: String, status: StatusCode },

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Authorization failed: {0}")]
    Authorization(String),

    #[error("Authorization was declined: {0}")]
    AuthorizationDeclined(String),

    #[error("Authorization timed out after {0} seconds")]
    AuthorizationTimedOut(u64),

    #[error("Please select at least one playlist to migrate.")]
    EmptySelection,

    #[error("No {0} user token available. Please log in first.")]
    MissingToken(Service),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// HTTP status of a failed backend call, if that is what this error is.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            AppError::Http { status, .. } => Some(*status),
            AppError::Request(e) => e.status(),
            _ => None,
        }
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;
