//! Error types for the HTTP server.

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mdview_loader::FetchError;
use serde_json::json;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ServerError {
    /// The document could not be fetched.
    #[error("Failed to load document: {0}")]
    Fetch(Arc<FetchError>),

    /// The loader has not produced a result yet.
    #[error("Document is not loaded yet")]
    NotReady,

    /// The blocking load or render task panicked or was cancelled.
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Fetch(err) => (
                StatusCode::BAD_GATEWAY,
                json!({"error": "Failed to load document", "message": err.to_string(), "url": err.url()}),
            ),
            Self::NotReady => (
                StatusCode::SERVICE_UNAVAILABLE,
                json!({"error": self.to_string()}),
            ),
            Self::Task(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"error": e.to_string()}),
            ),
        };

        (status, axum::Json(body)).into_response()
    }
}
