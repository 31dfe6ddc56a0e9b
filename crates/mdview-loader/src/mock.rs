//! Mock transport for testing.
//!
//! Provides [`MockTransport`] for unit testing without network access.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;

use crate::transport::{Transport, TransportError, TransportResponse};

/// Canned outcome for a URL.
#[derive(Clone, Debug)]
enum MockOutcome {
    Response(TransportResponse),
    Error(String),
}

/// Mock transport for testing.
///
/// Serves canned responses by URL and records every call. Unknown URLs get a
/// 404 response. Use the builder methods to configure the mock.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use mdview_loader::{DocumentLoader, DocumentRequest, MockTransport, Transport};
///
/// let transport = Arc::new(MockTransport::new().with_text("https://x/doc.md", "# Doc"));
/// let loader = DocumentLoader::new(Arc::clone(&transport) as Arc<dyn Transport>);
/// loader.resolve(&DocumentRequest::new("doc.md", "https://x"));
/// assert_eq!(transport.call_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MockTransport {
    outcomes: RwLock<HashMap<String, MockOutcome>>,
    calls: RwLock<Vec<String>>,
    delay: RwLock<Option<Duration>>,
}

impl MockTransport {
    /// Create a new empty mock transport.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Respond to `url` with status 200 and a text body.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_text(self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.with_response(url, 200, body.into().into_bytes())
    }

    /// Respond to `url` with a status and raw body.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_response(self, url: impl Into<String>, status: u16, body: Vec<u8>) -> Self {
        self.outcomes.write().unwrap().insert(
            url.into(),
            MockOutcome::Response(TransportResponse { status, body }),
        );
        self
    }

    /// Fail requests to `url` with a transport error.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_error(self, url: impl Into<String>, message: impl Into<String>) -> Self {
        self.outcomes
            .write()
            .unwrap()
            .insert(url.into(), MockOutcome::Error(message.into()));
        self
    }

    /// Sleep before answering each call.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_delay(self, delay: Duration) -> Self {
        *self.delay.write().unwrap() = Some(delay);
        self
    }

    /// URLs requested so far, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    /// Number of calls made so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }
}

impl Transport for MockTransport {
    fn get(&self, url: &str) -> Result<TransportResponse, TransportError> {
        self.calls.write().unwrap().push(url.to_owned());

        if let Some(delay) = *self.delay.read().unwrap() {
            std::thread::sleep(delay);
        }

        match self.outcomes.read().unwrap().get(url) {
            Some(MockOutcome::Response(response)) => Ok(response.clone()),
            Some(MockOutcome::Error(message)) => Err(TransportError::Other(message.clone())),
            None => Ok(TransportResponse {
                status: 404,
                body: b"not found".to_vec(),
            }),
        }
    }
}
