//! Presentation widgets produced by the renderer.

use crate::backend::RenderBackend;
use crate::html::HtmlBackend;
use crate::node::{Alignment, Inline};
use crate::toc::{TocEntry, TocItem};
use crate::writer::write_widgets;

/// One presentation widget. Every [`crate::DocumentNode`] maps to exactly one.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Widget {
    /// Anchor-addressable heading.
    Heading {
        level: u8,
        id: String,
        content: Vec<Inline>,
    },
    /// Paragraph.
    Paragraph(Vec<Inline>),
    /// Ordered or unordered list.
    List {
        ordered: bool,
        start: u64,
        tight: bool,
        items: Vec<ListItemView>,
    },
    /// Plain monospace code (no or unrecognized language, or highlighting failed).
    Code {
        language: Option<String>,
        literal: String,
    },
    /// Code colorized by the highlighter.
    HighlightedCode { language: String, html: String },
    /// Generated table of contents.
    TableOfContents(Vec<TocItem>),
    /// Block quote.
    BlockQuote(Vec<Widget>),
    /// Table.
    Table {
        alignments: Vec<Alignment>,
        head: Vec<Vec<Inline>>,
        rows: Vec<Vec<Vec<Inline>>>,
    },
    /// Horizontal rule.
    Rule,
    /// Raw HTML passed through.
    Html(String),
}

/// List item widget.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ListItemView {
    pub checked: Option<bool>,
    pub children: Vec<Widget>,
}

/// Result of rendering a document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ViewTree {
    /// Top-level widgets in document order.
    pub widgets: Vec<Widget>,
    /// Text of the first H1 heading.
    pub title: Option<String>,
    /// Flat table of contents (level 2..6 headings).
    pub toc: Vec<TocEntry>,
}

impl ViewTree {
    /// Serialize the widgets as HTML with the default backend.
    #[must_use]
    pub fn to_html(&self) -> String {
        self.render_with::<HtmlBackend>()
    }

    /// Serialize the widgets with a specific backend.
    #[must_use]
    pub fn render_with<B: RenderBackend>(&self) -> String {
        let mut out = String::with_capacity(4096);
        write_widgets::<B>(&self.widgets, &mut out);
        out
    }
}
