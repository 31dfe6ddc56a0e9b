//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;

/// Create the application router.
///
/// # Arguments
///
/// * `state` - Shared application state
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    let router = Router::new()
        .route("/", get(handlers::page::get_page))
        .route("/api/document", get(handlers::document::get_document))
        .route("/health", get(handlers::health::get_health));

    security::layers()
        .fold(router, |router, layer| router.layer(layer))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
