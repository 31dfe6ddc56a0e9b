//! Security headers set on every response.

use axum::http::HeaderValue;
use axum::http::header::HeaderName;
use tower_http::set_header::SetResponseHeaderLayer;

/// Content-Security-Policy header value.
///
/// Pages carry their stylesheet and highlighted code inline, and load no
/// scripts at all.
const CSP: &str = "default-src 'none'; \
                   style-src 'unsafe-inline'; \
                   img-src 'self' https: data:; \
                   frame-ancestors 'none'";

/// Headers added to every response, overriding handler values.
const HEADERS: [(&str, &str); 4] = [
    ("content-security-policy", CSP),
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("referrer-policy", "no-referrer"),
];

/// One header layer per entry in [`HEADERS`].
pub(crate) fn layers() -> impl Iterator<Item = SetResponseHeaderLayer<HeaderValue>> {
    HEADERS.into_iter().map(|(name, value)| {
        SetResponseHeaderLayer::overriding(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        )
    })
}
