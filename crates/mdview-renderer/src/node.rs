//! Document tree produced by parsing markdown.
//!
//! The tree is immutable once built: [`crate::parse_document`] produces it,
//! the slug transform fills heading ids in place, and the renderer only reads
//! it afterwards.

/// Block-level node of a parsed document.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DocumentNode {
    /// ATX or setext heading.
    Heading {
        /// Heading level (1-6).
        level: u8,
        /// Inline content.
        content: Vec<Inline>,
        /// Stable anchor id (empty until the slug transform runs).
        id: String,
    },
    /// Paragraph of inline content.
    Paragraph(Vec<Inline>),
    /// Ordered or unordered list.
    List {
        /// Whether the list is numbered.
        ordered: bool,
        /// First number of an ordered list (1 for unordered lists).
        start: u64,
        /// Tight lists render item text without paragraph wrappers.
        tight: bool,
        /// List items in source order.
        items: Vec<ListItem>,
    },
    /// Fenced or indented code block.
    CodeBlock {
        /// Language tag from the fence info string.
        language: Option<String>,
        /// Literal block content.
        literal: String,
    },
    /// Table of contents marker (`[TOC]`).
    TableOfContents {
        /// Byte offset of the marker in the source document.
        offset: usize,
        /// Marker text as written.
        marker: String,
    },
    /// Block quote containing nested blocks.
    BlockQuote(Vec<DocumentNode>),
    /// GFM table.
    Table {
        /// Column alignments.
        alignments: Vec<Alignment>,
        /// Header cells.
        head: Vec<Vec<Inline>>,
        /// Body rows.
        rows: Vec<Vec<Vec<Inline>>>,
    },
    /// Thematic break.
    Rule,
    /// Raw HTML block.
    Html(String),
}

/// Single list item.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ListItem {
    /// Task list state (`None` for regular items).
    pub checked: Option<bool>,
    /// Blocks inside the item.
    pub children: Vec<DocumentNode>,
}

/// Inline content node.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Inline {
    /// Literal text.
    Text(String),
    /// Inline code span.
    Code(String),
    /// Emphasized content.
    Emphasis(Vec<Inline>),
    /// Strongly emphasized content.
    Strong(Vec<Inline>),
    /// Struck-through content.
    Strikethrough(Vec<Inline>),
    /// Hyperlink.
    Link {
        /// Link destination.
        href: String,
        /// Optional title attribute.
        title: String,
        /// Link text.
        content: Vec<Inline>,
    },
    /// Image.
    Image {
        /// Image source.
        src: String,
        /// Alternative text.
        alt: String,
        /// Optional title attribute.
        title: String,
    },
    /// Soft line break.
    SoftBreak,
    /// Hard line break.
    HardBreak,
    /// Raw inline HTML.
    Html(String),
}

/// Table column alignment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Alignment {
    #[default]
    None,
    Left,
    Center,
    Right,
}

impl From<pulldown_cmark::Alignment> for Alignment {
    fn from(alignment: pulldown_cmark::Alignment) -> Self {
        match alignment {
            pulldown_cmark::Alignment::None => Self::None,
            pulldown_cmark::Alignment::Left => Self::Left,
            pulldown_cmark::Alignment::Center => Self::Center,
            pulldown_cmark::Alignment::Right => Self::Right,
        }
    }
}

/// Concatenate the plain text of inline content.
///
/// Used for heading slugs, table of contents titles and image alt text.
#[must_use]
pub fn plain_text(content: &[Inline]) -> String {
    let mut out = String::new();
    push_plain_text(content, &mut out);
    out
}

fn push_plain_text(content: &[Inline], out: &mut String) {
    for inline in content {
        match inline {
            Inline::Text(text) | Inline::Code(text) => out.push_str(text),
            Inline::Emphasis(children)
            | Inline::Strong(children)
            | Inline::Strikethrough(children)
            | Inline::Link {
                content: children, ..
            } => push_plain_text(children, out),
            Inline::Image { alt, .. } => out.push_str(alt),
            Inline::SoftBreak | Inline::HardBreak => out.push(' '),
            Inline::Html(_) => {}
        }
    }
}

/// Visit every heading in document order, descending into containers.
pub(crate) fn for_each_heading_mut<F>(nodes: &mut [DocumentNode], f: &mut F)
where
    F: FnMut(u8, &[Inline], &mut String),
{
    for node in nodes {
        match node {
            DocumentNode::Heading { level, content, id } => f(*level, content, id),
            DocumentNode::BlockQuote(children) => for_each_heading_mut(children, f),
            DocumentNode::List { items, .. } => {
                for item in items {
                    for_each_heading_mut(&mut item.children, f);
                }
            }
            DocumentNode::Paragraph(_)
            | DocumentNode::CodeBlock { .. }
            | DocumentNode::TableOfContents { .. }
            | DocumentNode::Table { .. }
            | DocumentNode::Rule
            | DocumentNode::Html(_) => {}
        }
    }
}

/// Visit every heading in document order without mutating.
pub(crate) fn for_each_heading<F>(nodes: &[DocumentNode], f: &mut F)
where
    F: FnMut(u8, &[Inline], &str),
{
    for node in nodes {
        match node {
            DocumentNode::Heading { level, content, id } => f(*level, content, id),
            DocumentNode::BlockQuote(children) => for_each_heading(children, f),
            DocumentNode::List { items, .. } => {
                for item in items {
                    for_each_heading(&item.children, f);
                }
            }
            DocumentNode::Paragraph(_)
            | DocumentNode::CodeBlock { .. }
            | DocumentNode::TableOfContents { .. }
            | DocumentNode::Table { .. }
            | DocumentNode::Rule
            | DocumentNode::Html(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_flattens_formatting() {
        let content = vec![
            Inline::Text("Install ".to_owned()),
            Inline::Code("npm".to_owned()),
            Inline::Strong(vec![Inline::Text(" now".to_owned())]),
        ];
        assert_eq!(plain_text(&content), "Install npm now");
    }

    #[test]
    fn test_plain_text_uses_link_text_and_image_alt() {
        let content = vec![
            Inline::Link {
                href: "https://example.com".to_owned(),
                title: String::new(),
                content: vec![Inline::Text("docs".to_owned())],
            },
            Inline::SoftBreak,
            Inline::Image {
                src: "a.png".to_owned(),
                alt: "diagram".to_owned(),
                title: String::new(),
            },
        ];
        assert_eq!(plain_text(&content), "docs diagram");
    }

    #[test]
    fn test_for_each_heading_descends_into_containers() {
        let mut nodes = vec![
            DocumentNode::Heading {
                level: 1,
                content: vec![Inline::Text("Top".to_owned())],
                id: String::new(),
            },
            DocumentNode::BlockQuote(vec![DocumentNode::Heading {
                level: 2,
                content: vec![Inline::Text("Quoted".to_owned())],
                id: String::new(),
            }]),
        ];

        let mut seen = Vec::new();
        for_each_heading_mut(&mut nodes, &mut |level, content, id| {
            seen.push((level, plain_text(content)));
            id.push('x');
        });

        assert_eq!(seen, vec![(1, "Top".to_owned()), (2, "Quoted".to_owned())]);
        let mut ids = Vec::new();
        for_each_heading(&nodes, &mut |_, _, id| ids.push(id.to_owned()));
        assert_eq!(ids, vec!["x", "x"]);
    }
}
