//! Error types shared by the vote store, providers and web handlers

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by papervote components
#[derive(Debug, Error)]
pub enum Error {
    /// Bad or missing request parameters
    #[error("{0}")]
    InvalidInput(String),

    /// An outbound provider call failed. Providers log this and degrade to an
    /// empty result list; it never reaches a client.
    #[error("{provider} unavailable: {reason}")]
    ProviderUnavailable { provider: String, reason: String },

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("storage lock poisoned: {0}")]
    StorageLock(String),

    #[error("blocking task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("paper feed error: {0}")]
    PaperFeed(#[source] anyhow::Error),

    #[error("template error: {0}")]
    Template(String),
}

impl Error {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn provider(provider: impl Into<String>, reason: impl ToString) -> Self {
        Self::ProviderUnavailable {
            provider: provider.into(),
            reason: reason.to_string(),
        }
    }

    /// HTTP status used when this error is returned from a handler
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::ProviderUnavailable { .. } => StatusCode::BAD_GATEWAY,
            Self::Storage(_)
            | Self::StorageLock(_)
            | Self::Task(_)
            | Self::Io(_)
            | Self::PaperFeed(_)
            | Self::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }
        let message = match self {
            Self::InvalidInput(msg) => msg,
            other => other.to_string(),
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
