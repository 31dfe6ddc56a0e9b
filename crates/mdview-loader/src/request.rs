//! Document request identity and URL resolution.

use std::fmt;

use crate::error::FetchError;

/// Schemes a document can be fetched from.
const SUPPORTED_SCHEMES: [&str; 3] = ["http://", "https://", "file://"];

/// Identity of a document fetch.
///
/// Two requests are the same cache entry exactly when both fields are equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DocumentRequest {
    /// Relative path or absolute URL of the document.
    pub path: String,
    /// Origin the path is resolved against. Empty means the loader's default
    /// origin.
    pub base: String,
}

impl DocumentRequest {
    /// Create a request for `path` under `base`.
    pub fn new(path: impl Into<String>, base: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            base: base.into(),
        }
    }

    /// Create a request resolved against the loader's default origin.
    pub fn relative(path: impl Into<String>) -> Self {
        Self::new(path, String::new())
    }

    /// Build the absolute URL for this request.
    ///
    /// `default_origin` is used when `base` is empty.
    pub fn url(&self, default_origin: Option<&str>) -> Result<String, FetchError> {
        validate_path(&self.path)?;

        if is_absolute_url(&self.path) {
            return Ok(self.path.clone());
        }

        let base = if self.base.is_empty() {
            default_origin.unwrap_or_default()
        } else {
            self.base.as_str()
        };
        if base.is_empty() {
            return Err(FetchError::invalid(format!(
                "relative path {:?} requires a base origin",
                self.path
            )));
        }
        if !is_absolute_url(base) {
            return Err(FetchError::invalid(format!(
                "base {base:?} must start with http://, https:// or file://"
            )));
        }

        Ok(join_url(base, &self.path))
    }
}

impl fmt::Display for DocumentRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.base, self.path)
    }
}

fn validate_path(path: &str) -> Result<(), FetchError> {
    if path.is_empty() {
        return Err(FetchError::invalid("document path is empty"));
    }
    if path.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(FetchError::invalid(format!(
            "document path {path:?} contains whitespace or control characters"
        )));
    }
    Ok(())
}

fn is_absolute_url(value: &str) -> bool {
    SUPPORTED_SCHEMES.iter().any(|scheme| {
        value.len() > scheme.len()
            && value
                .get(..scheme.len())
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

/// Join base and path with exactly one `/`.
fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_join_single_slash() {
        for (base, path) in [
            ("https://example.com", "doc.md"),
            ("https://example.com/", "doc.md"),
            ("https://example.com", "/doc.md"),
            ("https://example.com//", "//doc.md"),
        ] {
            let url = DocumentRequest::new(path, base).url(None).unwrap();
            assert_eq!(url, "https://example.com/doc.md");
        }
    }

    #[test]
    fn test_empty_base_uses_default_origin() {
        let request = DocumentRequest::relative("functional-programming.md");
        assert_eq!(
            request.url(Some("http://localhost:3000")).unwrap(),
            "http://localhost:3000/functional-programming.md"
        );
    }

    #[test]
    fn test_explicit_base_wins_over_default() {
        let request = DocumentRequest::new("a.md", "https://docs.example.com/guide");
        assert_eq!(
            request.url(Some("http://localhost")).unwrap(),
            "https://docs.example.com/guide/a.md"
        );
    }

    #[test]
    fn test_absolute_path_used_as_is() {
        let request = DocumentRequest::new("HTTPS://cdn.example.com/x.md", "https://ignored");
        assert_eq!(request.url(None).unwrap(), "HTTPS://cdn.example.com/x.md");

        let request = DocumentRequest::relative("file:///tmp/doc.md");
        assert_eq!(request.url(None).unwrap(), "file:///tmp/doc.md");
    }

    #[test]
    fn test_relative_path_without_origin_is_invalid() {
        let err = DocumentRequest::relative("doc.md").url(None).unwrap_err();
        assert!(matches!(err, FetchError::InvalidRequest { .. }));
        assert!(err.to_string().contains("requires a base origin"));
    }

    #[test]
    fn test_invalid_base_scheme() {
        let err = DocumentRequest::new("doc.md", "ftp://example.com")
            .url(None)
            .unwrap_err();
        assert!(err.to_string().contains("ftp://example.com"));

        assert!(DocumentRequest::new("doc.md", "http://").url(None).is_err());
    }

    #[test]
    fn test_invalid_paths() {
        for path in ["", "my doc.md", "doc\n.md", "doc\u{7}.md"] {
            let err = DocumentRequest::new(path, "https://example.com")
                .url(None)
                .unwrap_err();
            assert!(
                matches!(err, FetchError::InvalidRequest { .. }),
                "{path:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_request_identity() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(DocumentRequest::new("a.md", "https://x"));
        set.insert(DocumentRequest::new("a.md", "https://x"));
        set.insert(DocumentRequest::new("a.md", ""));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            DocumentRequest::new("/doc.md", "https://x").to_string(),
            "https://x/doc.md"
        );
    }
}
