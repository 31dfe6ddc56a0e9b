//! Request-keyed document cache.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use crate::error::FetchError;
use crate::request::DocumentRequest;
use crate::state::DocumentState;
use crate::transport::Transport;

type Slot = Arc<OnceLock<DocumentState>>;

/// Fetches documents and caches the outcome per request.
///
/// Each distinct [`DocumentRequest`] is fetched at most once for the lifetime
/// of the loader (or until it is invalidated). Failures are cached too: there
/// is no automatic retry.
///
/// Concurrent [`resolve`](Self::resolve) calls for the same request share a
/// single fetch. The map lock is only held to look up the slot; the fetch
/// runs inside the slot's `OnceLock`, so resolving different requests does
/// not serialize.
pub struct DocumentLoader {
    transport: Arc<dyn Transport>,
    default_origin: Option<String>,
    cache: Mutex<HashMap<DocumentRequest, Slot>>,
}

impl DocumentLoader {
    /// Create a loader that fetches through `transport`.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            default_origin: None,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Set the origin used for requests with an empty base.
    #[must_use]
    pub fn with_default_origin(mut self, origin: impl Into<String>) -> Self {
        let origin = origin.into();
        self.default_origin = (!origin.is_empty()).then_some(origin);
        self
    }

    /// Origin used for requests with an empty base.
    pub fn default_origin(&self) -> Option<&str> {
        self.default_origin.as_deref()
    }

    /// Resolve a request, fetching it on first use.
    ///
    /// Blocks until the state is `Loaded` or `Failed`. Never returns
    /// `Pending`.
    pub fn resolve(&self, request: &DocumentRequest) -> DocumentState {
        let slot = self.slot(request);
        if let Some(state) = slot.get() {
            tracing::debug!(request = %request, "Document cache hit");
            return state.clone();
        }
        slot.get_or_init(|| self.fetch(request)).clone()
    }

    /// Current state of a request without triggering or waiting for a fetch.
    pub fn state(&self, request: &DocumentRequest) -> DocumentState {
        self.lock()
            .get(request)
            .and_then(|slot| slot.get().cloned())
            .unwrap_or(DocumentState::Pending)
    }

    /// Forget the cached state of one request.
    ///
    /// The next [`resolve`](Self::resolve) fetches again. A fetch already in
    /// flight completes for its waiters but is not cached.
    /// Returns whether an entry was removed.
    pub fn invalidate(&self, request: &DocumentRequest) -> bool {
        let removed = self.lock().remove(request).is_some();
        if removed {
            tracing::debug!(request = %request, "Invalidated cached document");
        }
        removed
    }

    /// Forget every cached state.
    pub fn clear(&self) {
        self.lock().clear();
        tracing::debug!("Cleared document cache");
    }

    /// Number of cached (or in-flight) requests.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn slot(&self, request: &DocumentRequest) -> Slot {
        let mut cache = self.lock();
        Arc::clone(cache.entry(request.clone()).or_default())
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<DocumentRequest, Slot>> {
        // Slots are only inserted or removed under the lock, so the map is
        // consistent even if a holder panicked.
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn fetch(&self, request: &DocumentRequest) -> DocumentState {
        let result = self.fetch_content(request);
        match &result {
            Ok(content) => {
                tracing::info!(request = %request, bytes = content.len(), "Loaded document");
            }
            Err(err) => {
                tracing::warn!(request = %request, error = %err, "Failed to load document");
            }
        }
        result.into()
    }

    fn fetch_content(&self, request: &DocumentRequest) -> Result<String, FetchError> {
        let url = request.url(self.default_origin.as_deref())?;
        tracing::debug!(url = %url, "Fetching document");

        let response = self
            .transport
            .get(&url)
            .map_err(|source| FetchError::Transport {
                url: url.clone(),
                source,
            })?;

        if !response.is_success() {
            return Err(FetchError::status(&url, response.status, &response.body));
        }

        String::from_utf8(response.body).map_err(|source| FetchError::Decode { url, source })
    }
}
