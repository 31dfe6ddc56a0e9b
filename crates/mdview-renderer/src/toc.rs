//! Table of contents generation.

use crate::node::{DocumentNode, for_each_heading, plain_text};

/// Lowest heading level listed (level 1 is the document title).
pub const MIN_TOC_LEVEL: u8 = 2;

/// Highest heading level listed.
pub const MAX_TOC_LEVEL: u8 = 6;

/// Table of contents entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TocEntry {
    /// Heading level (2-6).
    pub level: u8,
    /// Heading text.
    pub title: String,
    /// Anchor ID for linking.
    pub id: String,
}

/// Node of the nested table of contents.
///
/// Nesting depth equals `level - 2`. When levels skip (an H4 right after an
/// H2), the missing depth is filled by an item without an entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TocItem {
    /// Heading this item links to (`None` for a level-gap filler).
    pub entry: Option<TocEntry>,
    /// Deeper items.
    pub children: Vec<TocItem>,
}

/// Collect level 2..6 headings in document order.
///
/// Headings must already carry their ids.
#[must_use]
pub fn collect_entries(nodes: &[DocumentNode]) -> Vec<TocEntry> {
    let mut entries = Vec::new();
    for_each_heading(nodes, &mut |level, content, id| {
        if (MIN_TOC_LEVEL..=MAX_TOC_LEVEL).contains(&level) {
            entries.push(TocEntry {
                level,
                title: plain_text(content).trim().to_owned(),
                id: id.to_owned(),
            });
        }
    });
    entries
}

/// Nest flat entries by raw heading level.
#[must_use]
pub fn nest_entries(entries: &[TocEntry]) -> Vec<TocItem> {
    let mut root: Vec<TocItem> = Vec::new();

    for entry in entries {
        let depth = entry.level.saturating_sub(MIN_TOC_LEVEL);
        let mut siblings = &mut root;
        for _ in 0..depth {
            if siblings.is_empty() {
                siblings.push(TocItem::default());
            }
            let last = siblings.len() - 1;
            siblings = &mut siblings[last].children;
        }
        siblings.push(TocItem {
            entry: Some(entry.clone()),
            children: Vec::new(),
        });
    }

    root
}
