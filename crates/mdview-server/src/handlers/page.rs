//! HTML page endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use mdview_renderer::{render_error_page, render_page};

use crate::error::ServerError;
use crate::handlers::{compute_etag, render_document};
use crate::state::AppState;

/// Handle GET /.
///
/// Serves the rendered document as a standalone page. A failed load is shown
/// as an error page with status 502.
pub(crate) async fn get_page(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let view = match render_document(&state).await {
        Ok(view) => view,
        Err(ServerError::Fetch(err)) => {
            let location = err
                .url()
                .map_or_else(|| state.request.to_string(), str::to_owned);
            let html = render_error_page(&location, &err.to_string());
            return (StatusCode::BAD_GATEWAY, Html(html)).into_response();
        }
        Err(err) => return err.into_response(),
    };

    let html = render_page(&view);
    let etag = compute_etag(&state.version, &html);

    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && if_none_match.as_bytes() == etag.as_bytes()
    {
        return StatusCode::NOT_MODIFIED.into_response();
    }

    (
        [
            (header::ETAG, etag),
            (header::CACHE_CONTROL, "no-cache".to_owned()),
        ],
        Html(html),
    )
        .into_response()
}
