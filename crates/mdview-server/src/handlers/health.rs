//! Health endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use mdview_loader::DocumentState;
use serde::Serialize;

use crate::state::AppState;

/// Response for GET /health.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: String,
    /// Load state of the document, observed without triggering a fetch.
    document: &'static str,
}

/// Handle GET /health.
pub(crate) async fn get_health(State(state): State<Arc<AppState>>) -> impl axum::response::IntoResponse {
    let document = match state.loader.state(&state.request) {
        DocumentState::Pending => "pending",
        DocumentState::Loaded(_) => "loaded",
        DocumentState::Failed(_) => "failed",
    };
    Json(HealthResponse {
        status: "ok",
        version: state.version.clone(),
        document,
    })
}
