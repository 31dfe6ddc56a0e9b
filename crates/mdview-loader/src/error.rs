//! Fetch error types.

use crate::transport::TransportError;

/// Maximum number of bytes of an error response body kept in [`FetchError::Status`].
const MAX_BODY_SNIPPET: usize = 512;

/// Why a document could not be loaded.
///
/// Every variant formats to a non-empty, human-readable message. The
/// underlying cause, when there is one, is available through
/// [`std::error::Error::source`].
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The request could not be turned into a URL. No network call was made.
    #[error("invalid document request: {reason}")]
    InvalidRequest { reason: String },

    /// The transport failed before a response was received.
    #[error("failed to fetch {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: TransportError,
    },

    /// The server answered with a non-success status.
    #[error("failed to fetch {url}: HTTP {status}")]
    Status {
        url: String,
        status: u16,
        /// Start of the response body, for diagnostics.
        body: String,
    },

    /// The body is not valid UTF-8 text.
    #[error("document at {url} is not valid UTF-8")]
    Decode {
        url: String,
        #[source]
        source: std::string::FromUtf8Error,
    },
}

impl FetchError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            reason: reason.into(),
        }
    }

    pub(crate) fn status(url: &str, status: u16, body: &[u8]) -> Self {
        let body = String::from_utf8_lossy(body);
        let mut end = body.len().min(MAX_BODY_SNIPPET);
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        Self::Status {
            url: url.to_owned(),
            status,
            body: body[..end].trim().to_owned(),
        }
    }

    /// URL the failure relates to (`None` for invalid requests).
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::InvalidRequest { .. } => None,
            Self::Transport { url, .. } | Self::Status { url, .. } | Self::Decode { url, .. } => {
                Some(url)
            }
        }
    }

    /// HTTP status of the response, if one was received.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_status_message() {
        let err = FetchError::status("https://x/doc.md", 500, b"  boom  ");
        assert_eq!(err.to_string(), "failed to fetch https://x/doc.md: HTTP 500");
        assert_eq!(err.http_status(), Some(500));
        assert_eq!(err.url(), Some("https://x/doc.md"));
        assert!(matches!(&err, FetchError::Status { body, .. } if body == "boom"));
    }

    #[test]
    fn test_status_body_truncated_on_char_boundary() {
        let body = "é".repeat(MAX_BODY_SNIPPET);
        let err = FetchError::status("u", 502, body.as_bytes());
        let FetchError::Status { body, .. } = err else {
            panic!("expected status error");
        };
        assert!(body.len() <= MAX_BODY_SNIPPET);
        assert!(body.chars().all(|c| c == 'é'));
    }

    #[test]
    fn test_decode_has_source() {
        let source = String::from_utf8(vec![0xff, 0xfe]).unwrap_err();
        let err = FetchError::Decode {
            url: "u".to_owned(),
            source,
        };
        assert!(err.source().is_some());
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn test_invalid_request_has_no_url() {
        let err = FetchError::invalid("document path is empty");
        assert_eq!(err.url(), None);
        assert_eq!(
            err.to_string(),
            "invalid document request: document path is empty"
        );
    }
}
