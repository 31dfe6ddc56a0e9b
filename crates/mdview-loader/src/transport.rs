//! Transports that perform the actual retrieval.

use std::path::PathBuf;
use std::time::Duration;

use percent_encoding::percent_decode_str;
use ureq::Agent;

/// Default timeout for HTTP requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Raw response returned by a [`Transport`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP-style status code.
    pub status: u16,
    /// Response body.
    pub body: Vec<u8>,
}

impl TransportResponse {
    /// Whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Error raised before a response is available.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// HTTP request failed (connection, TLS, timeout, body read).
    #[error("HTTP request failed: {0}")]
    Http(#[from] ureq::Error),

    /// Local file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No transport handles the URL scheme.
    #[error("unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    /// Transport-specific failure without a structured cause.
    #[error("{0}")]
    Other(String),
}

/// Performs a single GET-style retrieval.
pub trait Transport: Send + Sync {
    /// Retrieve `url`.
    ///
    /// Non-success statuses are returned as responses, not errors.
    fn get(&self, url: &str) -> Result<TransportResponse, TransportError>;
}

/// HTTP(S) transport backed by `ureq`.
pub struct HttpTransport {
    agent: Agent,
}

impl HttpTransport {
    /// Create a transport with the given global request timeout.
    pub fn new(timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();
        Self { agent }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<TransportResponse, TransportError> {
        let response = self
            .agent
            .get(url)
            .header("Accept", "text/markdown, text/plain;q=0.9, */*;q=0.1")
            .call()?;

        let status = response.status().as_u16();
        let body = response.into_body().read_to_vec()?;
        Ok(TransportResponse { status, body })
    }
}

/// Transport for `file://` URLs.
///
/// The URL path is percent-decoded before it is read. A missing file is
/// reported as a 404 response so it surfaces the same way as a missing
/// remote document.
#[derive(Debug, Default)]
pub struct FileTransport;

impl FileTransport {
    const SCHEME: &'static str = "file://";

    fn path_of(url: &str) -> Result<PathBuf, TransportError> {
        let encoded = url
            .get(..Self::SCHEME.len())
            .filter(|prefix| prefix.eq_ignore_ascii_case(Self::SCHEME))
            .map(|_| &url[Self::SCHEME.len()..])
            .ok_or_else(|| TransportError::UnsupportedScheme(url.to_owned()))?;

        let decoded = percent_decode_str(encoded)
            .decode_utf8()
            .map_err(|_| TransportError::Other(format!("{url} is not valid UTF-8 once decoded")))?;
        Ok(PathBuf::from(decoded.as_ref()))
    }
}

impl Transport for FileTransport {
    fn get(&self, url: &str) -> Result<TransportResponse, TransportError> {
        let path = Self::path_of(url)?;

        match std::fs::read(&path) {
            Ok(body) => Ok(TransportResponse { status: 200, body }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(TransportResponse {
                status: 404,
                body: Vec::new(),
            }),
            Err(source) => Err(TransportError::Io { path, source }),
        }
    }
}

/// Routes `http(s)://` URLs to [`HttpTransport`] and `file://` URLs to
/// [`FileTransport`].
#[derive(Default)]
pub struct DefaultTransport {
    http: HttpTransport,
    file: FileTransport,
}

impl DefaultTransport {
    /// Create a transport with the given HTTP timeout.
    pub fn new(timeout: Duration) -> Self {
        Self {
            http: HttpTransport::new(timeout),
            file: FileTransport,
        }
    }
}

impl Transport for DefaultTransport {
    fn get(&self, url: &str) -> Result<TransportResponse, TransportError> {
        let scheme = url.split_once("://").map(|(scheme, _)| scheme.to_ascii_lowercase());
        match scheme.as_deref() {
            Some("http" | "https") => self.http.get(url),
            Some("file") => self.file.get(url),
            _ => Err(TransportError::UnsupportedScheme(url.to_owned())),
        }
    }
}
