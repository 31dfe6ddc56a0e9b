//! HTTP request handlers.

pub(crate) mod document;
pub(crate) mod health;
pub(crate) mod page;

use std::sync::Arc;

use md5::{Digest, Md5};
use mdview_loader::DocumentState;
use mdview_renderer::ViewTree;

use crate::error::ServerError;
use crate::state::AppState;

/// Resolve the configured document and render it.
///
/// Loading and rendering are blocking, so both run on the blocking pool.
/// The loader fetches the document once; later requests reuse its cache.
pub(crate) async fn render_document(state: &Arc<AppState>) -> Result<ViewTree, ServerError> {
    let state = Arc::clone(state);
    tokio::task::spawn_blocking(move || match state.loader.resolve(&state.request) {
        DocumentState::Loaded(content) => Ok(state.renderer.render(&content)),
        DocumentState::Failed(err) => Err(ServerError::Fetch(err)),
        DocumentState::Pending => Err(ServerError::NotReady),
    })
    .await?
}

/// Compute `ETag` from version and content.
///
/// Uses MD5 hash truncated to 64 bits (16 hex chars).
pub(crate) fn compute_etag(version: &str, content: &str) -> String {
    let hash = Md5::digest(format!("{version}:{content}").as_bytes());
    format!("\"{}\"", &hex::encode(hash)[..16])
}
