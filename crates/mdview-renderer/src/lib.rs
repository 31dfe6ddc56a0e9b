//! Markdown document rendering with heading anchors, table of contents and
//! syntax highlighting.
//!
//! # Architecture
//!
//! Rendering is a pipeline of pure steps:
//! - [`parse_document`]: pulldown-cmark events to a [`DocumentNode`] tree
//! - [`assign_heading_ids`]: unique, stable anchor ids for every heading
//! - [`collect_entries`] / [`nest_entries`]: table of contents at the first
//!   `[TOC]` marker
//! - widget mapping: each node to one [`Widget`], code blocks through a
//!   [`Highlighter`]
//!
//! [`DocumentRenderer`] runs the whole pipeline and returns a [`ViewTree`].
//! The view tree is serialized through the [`RenderBackend`] trait;
//! [`HtmlBackend`] produces semantic HTML5 and [`render_page`] wraps it in a
//! standalone page.
//!
//! # Example
//!
//! ```
//! use mdview_renderer::DocumentRenderer;
//!
//! let view = DocumentRenderer::new().render("# Hello\n\n## Intro\n\n**Bold** text");
//! assert_eq!(view.title.as_deref(), Some("Hello"));
//! assert!(view.to_html().contains(r#"<h2 id="intro">Intro</h2>"#));
//! ```

mod backend;
mod highlight;
mod html;
mod node;
mod page;
mod parser;
mod renderer;
mod slug;
mod toc;
mod util;
mod view;
mod writer;

pub use backend::RenderBackend;
pub use highlight::{HighlightError, Highlighter, SyntectHighlighter};
pub use html::HtmlBackend;
pub use node::{Alignment, DocumentNode, Inline, ListItem, plain_text};
pub use page::{DEFAULT_TITLE, STYLESHEET, render_error_page, render_page};
pub use parser::parse_document;
pub use renderer::DocumentRenderer;
pub use slug::{MAX_SLUG_LEN, SlugRegistry, assign_heading_ids, slugify};
pub use toc::{MAX_TOC_LEVEL, MIN_TOC_LEVEL, TocEntry, TocItem, collect_entries, nest_entries};
pub use util::escape_html;
pub use view::{ListItemView, ViewTree, Widget};
