//! Heading anchor ids.
//!
//! Ids are derived from heading text only, so the same document always gets
//! the same anchors. Collisions are resolved in document order by appending
//! `-2`, `-3`, ...

use std::collections::HashSet;

use crate::node::{DocumentNode, for_each_heading_mut, plain_text};

/// Maximum slug length in bytes (before a collision suffix is added).
pub const MAX_SLUG_LEN: usize = 64;

/// Slug used when heading text has no alphanumeric characters.
const FALLBACK_SLUG: &str = "section";

/// Convert text to a URL-safe slug.
///
/// Lowercases the text and collapses every run of whitespace or punctuation
/// into a single dash. Leading and trailing dashes are dropped and the
/// result is truncated to [`MAX_SLUG_LEN`] bytes on a character boundary.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut result = String::new();
    let mut pending_dash = false;

    for c in text.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !result.is_empty() {
                result.push('-');
            }
            pending_dash = false;
            result.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }

    if result.len() > MAX_SLUG_LEN {
        let mut cut = MAX_SLUG_LEN;
        while !result.is_char_boundary(cut) {
            cut -= 1;
        }
        result.truncate(cut);
        while result.ends_with('-') {
            result.pop();
        }
    }

    result
}

/// Issues unique slugs in document order.
#[derive(Debug, Default)]
pub struct SlugRegistry {
    used: HashSet<String>,
}

impl SlugRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a slug for `text` that no earlier call has returned.
    pub fn unique(&mut self, text: &str) -> String {
        let mut base = slugify(text);
        if base.is_empty() {
            FALLBACK_SLUG.clone_into(&mut base);
        }

        if self.used.insert(base.clone()) {
            return base;
        }

        let mut n = 2usize;
        loop {
            let candidate = format!("{base}-{n}");
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}

/// Assign a stable id to every heading of the tree, in document order.
pub fn assign_heading_ids(nodes: &mut [DocumentNode]) {
    let mut registry = SlugRegistry::new();
    for_each_heading_mut(nodes, &mut |_level, content, id| {
        *id = registry.unique(&plain_text(content));
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Inline;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("What's New?"), "what-s-new");
        assert_eq!(slugify("  Spaces  "), "spaces");
        assert_eq!(slugify("Multiple   Spaces"), "multiple-spaces");
        assert_eq!(slugify("kebab-case"), "kebab-case");
        assert_eq!(slugify("snake_case"), "snake-case");
        assert_eq!(slugify("Pure Functions & Side-Effects!"), "pure-functions-side-effects");
    }

    #[test]
    fn test_slugify_unicode() {
        assert_eq!(slugify("Café Ünïcode"), "café-ünïcode");
    }

    #[test]
    fn test_slugify_truncates_on_char_boundary() {
        let long = "é".repeat(100);
        let slug = slugify(&long);
        assert!(slug.len() <= MAX_SLUG_LEN);
        assert!(slug.chars().all(|c| c == 'é'));

        let words = "word ".repeat(40);
        let slug = slugify(&words);
        assert!(slug.len() <= MAX_SLUG_LEN);
        assert!(!slug.ends_with('-'));
    }

    #[test]
    fn test_registry_suffixes() {
        let mut registry = SlugRegistry::new();
        assert_eq!(registry.unique("Intro"), "intro");
        assert_eq!(registry.unique("Intro"), "intro-2");
        assert_eq!(registry.unique("Intro"), "intro-3");
    }

    #[test]
    fn test_registry_avoids_literal_suffix_collision() {
        let mut registry = SlugRegistry::new();
        assert_eq!(registry.unique("Intro 2"), "intro-2");
        assert_eq!(registry.unique("Intro"), "intro");
        assert_eq!(registry.unique("Intro"), "intro-3");
    }

    #[test]
    fn test_registry_fallback_for_punctuation() {
        let mut registry = SlugRegistry::new();
        assert_eq!(registry.unique("???"), "section");
        assert_eq!(registry.unique(""), "section-2");
    }

    #[test]
    fn test_assign_heading_ids() {
        let heading = |text: &str| DocumentNode::Heading {
            level: 2,
            content: vec![Inline::Text(text.to_owned())],
            id: String::new(),
        };
        let mut nodes = vec![heading("Intro"), heading("Intro"), heading("Intro")];
        assign_heading_ids(&mut nodes);

        let ids: Vec<&str> = nodes
            .iter()
            .map(|node| match node {
                DocumentNode::Heading { id, .. } => id.as_str(),
                _ => "",
            })
            .collect();
        assert_eq!(ids, vec!["intro", "intro-2", "intro-3"]);
    }
}
