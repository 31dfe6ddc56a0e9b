//! Document loading with a request-keyed cache.
//!
//! [`DocumentLoader`] turns a [`DocumentRequest`] into a [`DocumentState`].
//! Each distinct request is fetched once through a [`Transport`]; later
//! calls return the cached state. Concurrent calls for the same request wait
//! for a single in-flight fetch.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use mdview_loader::{DefaultTransport, DocumentLoader, DocumentRequest, DEFAULT_TIMEOUT};
//!
//! let loader = DocumentLoader::new(Arc::new(DefaultTransport::new(DEFAULT_TIMEOUT)));
//! let request = DocumentRequest::new("functional-programming.md", "https://example.com/docs");
//! match loader.resolve(&request).content() {
//!     Some(text) => println!("{} bytes", text.len()),
//!     None => eprintln!("failed"),
//! }
//! ```

mod error;
mod loader;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod request;
mod state;
mod transport;

pub use error::FetchError;
pub use loader::DocumentLoader;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockTransport;
pub use request::DocumentRequest;
pub use state::DocumentState;
pub use transport::{
    DEFAULT_TIMEOUT, DefaultTransport, FileTransport, HttpTransport, Transport, TransportError,
    TransportResponse,
};
