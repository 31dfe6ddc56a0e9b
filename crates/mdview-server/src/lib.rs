//! HTTP server that shows one markdown document.
//!
//! Routes:
//! - `GET /` - the rendered document as a standalone HTML page
//! - `GET /api/document` - title, table of contents and HTML content as JSON
//! - `GET /health` - liveness and the document's load state
//!
//! The document is fetched once through [`mdview_loader::DocumentLoader`]
//! and rendered with [`mdview_renderer::DocumentRenderer`].
//!
//! # Quick Start
//!
//! ```ignore
//! use mdview_loader::DocumentRequest;
//! use mdview_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         request: DocumentRequest::new("functional-programming.md", "https://example.com/docs"),
//!         ..ServerConfig::default()
//!     };
//!     run_server(config).await.unwrap();
//! }
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use mdview_loader::{DEFAULT_TIMEOUT, DefaultTransport, DocumentLoader, DocumentRequest};
use mdview_renderer::{DocumentRenderer, SyntectHighlighter};
use state::AppState;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Document to serve.
    pub request: DocumentRequest,
    /// HTTP timeout for fetching the document.
    pub timeout: Duration,
    /// Highlight theme (`None` disables highlighting).
    pub theme: Option<String>,
    /// Application version (for cache invalidation).
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7878,
            request: DocumentRequest::relative(mdview_config::DEFAULT_DOCUMENT_PATH),
            timeout: DEFAULT_TIMEOUT,
            theme: Some(SyntectHighlighter::DEFAULT_THEME.to_owned()),
            version: env!("CARGO_PKG_VERSION").to_owned(),
        }
    }
}

/// Run the HTTP server until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the highlight theme is unknown, the address is
/// invalid, or the server fails to bind.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut renderer = DocumentRenderer::new();
    if let Some(theme) = &config.theme {
        renderer = renderer.with_highlighter(SyntectHighlighter::with_theme(theme)?);
    }

    let loader = DocumentLoader::new(Arc::new(DefaultTransport::new(config.timeout)));

    let state = Arc::new(AppState {
        loader: Arc::new(loader),
        renderer,
        request: config.request.clone(),
        version: config.version.clone(),
    });

    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, document = %config.request, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from mdview config.
///
/// # Arguments
///
/// * `config` - mdview configuration
/// * `request` - Document to serve, already resolved by the caller
/// * `version` - Application version
#[must_use]
pub fn server_config_from_config(
    config: &mdview_config::Config,
    request: DocumentRequest,
    version: String,
) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        request,
        timeout: config.http.timeout(),
        theme: config
            .render
            .highlight
            .then(|| config.render.theme.clone()),
        version,
    }
}
