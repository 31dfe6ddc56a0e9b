//! CLI error types.

use std::sync::Arc;

use mdview_config::ConfigError;
use mdview_loader::FetchError;
use mdview_renderer::HighlightError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Fetch(Arc<FetchError>),

    #[error("{0} did not finish loading")]
    NotLoaded(String),

    #[error("{0}")]
    Highlight(#[from] HighlightError),

    #[error("{0}")]
    Server(String),
}
