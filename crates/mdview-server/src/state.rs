//! Application state.
//!
//! Shared state for all request handlers.

use std::sync::Arc;

use mdview_loader::{DocumentLoader, DocumentRequest};
use mdview_renderer::DocumentRenderer;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Loader with the request-keyed document cache.
    pub(crate) loader: Arc<DocumentLoader>,
    /// Markdown renderer.
    pub(crate) renderer: DocumentRenderer,
    /// The document this server shows.
    pub(crate) request: DocumentRequest,
    /// Application version for cache invalidation.
    pub(crate) version: String,
}
