//! Document API endpoint.
//!
//! Returns the rendered document as JSON with its title, table of contents
//! and HTML content.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use mdview_renderer::TocEntry;
use serde::Serialize;

use crate::error::ServerError;
use crate::handlers::{compute_etag, render_document};
use crate::state::AppState;

/// Response for GET /api/document.
#[derive(Serialize)]
struct DocumentResponse {
    /// Text of the first H1 heading.
    title: Option<String>,
    /// Table of contents entries (levels 2-6).
    toc: Vec<TocEntry>,
    /// Rendered HTML content.
    content: String,
}

/// Handle GET /api/document.
pub(crate) async fn get_document(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ServerError> {
    let view = render_document(&state).await?;
    let content = view.to_html();
    let etag = compute_etag(&state.version, &content);

    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && if_none_match.as_bytes() == etag.as_bytes()
    {
        return Ok(StatusCode::NOT_MODIFIED.into_response());
    }

    let response = DocumentResponse {
        title: view.title,
        toc: view.toc,
        content,
    };

    Ok((
        [
            (header::ETAG, etag),
            (header::CACHE_CONTROL, "no-cache".to_owned()),
        ],
        Json(response),
    )
        .into_response())
}
