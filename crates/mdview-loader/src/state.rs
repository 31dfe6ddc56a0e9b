//! Document load state.

use std::sync::Arc;

use crate::error::FetchError;

/// State of a document request.
///
/// `Loaded` and `Failed` are terminal for a given request: once reached the
/// loader keeps returning the same state until it is invalidated.
#[derive(Clone, Debug)]
pub enum DocumentState {
    /// Resolution has not finished yet.
    Pending,
    /// Document text.
    Loaded(String),
    /// The fetch failed. Shared so cached failures are cheap to clone.
    Failed(Arc<FetchError>),
}

impl DocumentState {
    /// Whether the request is still being resolved.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Document text, if loaded.
    pub fn content(&self) -> Option<&str> {
        match self {
            Self::Loaded(content) => Some(content),
            Self::Pending | Self::Failed(_) => None,
        }
    }

    /// Fetch error, if failed.
    pub fn error(&self) -> Option<&FetchError> {
        match self {
            Self::Failed(err) => Some(err),
            Self::Pending | Self::Loaded(_) => None,
        }
    }
}

impl From<Result<String, FetchError>> for DocumentState {
    fn from(result: Result<String, FetchError>) -> Self {
        match result {
            Ok(content) => Self::Loaded(content),
            Err(err) => Self::Failed(Arc::new(err)),
        }
    }
}
