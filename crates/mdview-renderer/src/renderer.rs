//! Markdown to view tree pipeline.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use crate::highlight::Highlighter;
use crate::node::{DocumentNode, Inline, for_each_heading, plain_text};
use crate::parser::parse_document;
use crate::slug::assign_heading_ids;
use crate::toc::{TocItem, collect_entries, nest_entries};
use crate::view::{ListItemView, ViewTree, Widget};

/// Renders markdown text into a [`ViewTree`].
///
/// Rendering is a pure function of the input text: parse, assign heading ids,
/// build the table of contents, then map each node to one widget. Code
/// blocks go through the configured [`Highlighter`]; without one, or when
/// highlighting fails, they render as plain code.
///
/// # Example
///
/// ```
/// use mdview_renderer::{DocumentRenderer, SyntectHighlighter};
///
/// let renderer = DocumentRenderer::new().with_highlighter(SyntectHighlighter::new());
/// let view = renderer.render("# Title\n\n[TOC]\n\n## Intro\n");
/// assert_eq!(view.title.as_deref(), Some("Title"));
/// assert_eq!(view.toc[0].id, "intro");
/// ```
#[derive(Clone, Default)]
pub struct DocumentRenderer {
    highlighter: Option<Arc<dyn Highlighter>>,
}

impl DocumentRenderer {
    /// Create a renderer without syntax highlighting.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Highlight fenced code blocks with `highlighter`.
    #[must_use]
    pub fn with_highlighter<H: Highlighter + 'static>(mut self, highlighter: H) -> Self {
        self.highlighter = Some(Arc::new(highlighter));
        self
    }

    /// Highlight fenced code blocks with a shared highlighter.
    #[must_use]
    pub fn with_shared_highlighter(mut self, highlighter: Arc<dyn Highlighter>) -> Self {
        self.highlighter = Some(highlighter);
        self
    }

    /// Whether code blocks are highlighted.
    pub fn highlights(&self) -> bool {
        self.highlighter.is_some()
    }

    /// Parse markdown and assign heading ids.
    #[must_use]
    pub fn parse(&self, content: &str) -> Vec<DocumentNode> {
        let mut nodes = parse_document(content);
        assign_heading_ids(&mut nodes);
        nodes
    }

    /// Render markdown into a view tree.
    #[must_use]
    pub fn render(&self, content: &str) -> ViewTree {
        let nodes = self.parse(content);
        let toc = collect_entries(&nodes);
        let title = extract_title(&nodes);

        let mut mapper = WidgetMapper {
            highlighter: self.highlighter.as_deref(),
            toc: Some(nest_entries(&toc)),
        };
        let widgets = mapper.map_nodes(nodes);

        ViewTree {
            widgets,
            title,
            toc,
        }
    }
}

/// Text of the first level 1 heading.
fn extract_title(nodes: &[DocumentNode]) -> Option<String> {
    let mut title = None;
    for_each_heading(nodes, &mut |level, content, _id| {
        if level == 1 && title.is_none() {
            title = Some(plain_text(content).trim().to_owned());
        }
    });
    title
}

struct WidgetMapper<'a> {
    highlighter: Option<&'a dyn Highlighter>,
    /// Nested TOC, taken by the first marker.
    toc: Option<Vec<TocItem>>,
}

impl WidgetMapper<'_> {
    fn map_nodes(&mut self, nodes: Vec<DocumentNode>) -> Vec<Widget> {
        nodes.into_iter().map(|node| self.map_node(node)).collect()
    }

    fn map_node(&mut self, node: DocumentNode) -> Widget {
        match node {
            DocumentNode::Heading { level, content, id } => Widget::Heading { level, id, content },
            DocumentNode::Paragraph(content) => Widget::Paragraph(content),
            DocumentNode::List {
                ordered,
                start,
                tight,
                items,
            } => Widget::List {
                ordered,
                start,
                tight,
                items: items
                    .into_iter()
                    .map(|item| ListItemView {
                        checked: item.checked,
                        children: self.map_nodes(item.children),
                    })
                    .collect(),
            },
            DocumentNode::CodeBlock { language, literal } => self.code_widget(language, literal),
            DocumentNode::TableOfContents { marker, .. } => match self.toc.take() {
                Some(items) => Widget::TableOfContents(items),
                None => Widget::Paragraph(vec![Inline::Text(marker)]),
            },
            DocumentNode::BlockQuote(children) => Widget::BlockQuote(self.map_nodes(children)),
            DocumentNode::Table {
                alignments,
                head,
                rows,
            } => Widget::Table {
                alignments,
                head,
                rows,
            },
            DocumentNode::Rule => Widget::Rule,
            DocumentNode::Html(html) => Widget::Html(html),
        }
    }

    fn code_widget(&self, language: Option<String>, literal: String) -> Widget {
        if let (Some(lang), Some(highlighter)) = (language.as_deref(), self.highlighter) {
            match catch_unwind(AssertUnwindSafe(|| highlighter.highlight(lang, &literal))) {
                Ok(Ok(Some(html))) => {
                    return Widget::HighlightedCode {
                        language: lang.to_owned(),
                        html,
                    };
                }
                Ok(Ok(None)) => {}
                Ok(Err(err)) => {
                    tracing::debug!(language = lang, error = %err, "Highlighting failed, rendering plain code");
                }
                Err(_) => {
                    tracing::debug!(language = lang, "Highlighter panicked, rendering plain code");
                }
            }
        }
        Widget::Code { language, literal }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::{HighlightError, SyntectHighlighter};
    use crate::toc::TocEntry;
    use pretty_assertions::assert_eq;

    fn highlighted() -> DocumentRenderer {
        DocumentRenderer::new().with_highlighter(SyntectHighlighter::new())
    }

    fn heading_ids(widgets: &[Widget]) -> Vec<String> {
        widgets
            .iter()
            .filter_map(|widget| match widget {
                Widget::Heading { id, .. } => Some(id.clone()),
                _ => None,
            })
            .collect()
    }

    /// Fails on "broken", panics on "boom", highlights everything else.
    struct FlakyHighlighter;

    impl Highlighter for FlakyHighlighter {
        fn highlight(&self, language: &str, code: &str) -> Result<Option<String>, HighlightError> {
            match language {
                "broken" => Err(HighlightError::UnknownTheme("broken".to_owned())),
                "boom" => panic!("grammar exploded"),
                _ => Ok(Some(format!("<b>{code}</b>"))),
            }
        }
    }

    #[test]
    fn test_render_never_empty() {
        let inputs = [
            "",
            "   \n\n  ",
            "```",
            "# ",
            "[TOC]",
            "* \n  * \n",
            "| a |\n|---|\n",
            "<div>",
            "\u{0}\u{feff}",
        ];
        for input in inputs {
            let view = DocumentRenderer::new().render(input);
            assert!(!view.widgets.is_empty(), "empty view for {input:?}");
        }
    }

    #[test]
    fn test_duplicate_headings_get_suffixes() {
        let view = DocumentRenderer::new().render("## Intro\n\n## Intro\n\n## Intro\n");
        assert_eq!(heading_ids(&view.widgets), vec!["intro", "intro-2", "intro-3"]);
    }

    #[test]
    fn test_heading_ids_pairwise_distinct() {
        let view = DocumentRenderer::new().render(
            "# A\n\n## A\n\n### a!\n\n## A 2\n\n## ???\n\n## \u{00bf}?\n\n> ## A\n\n- ## A\n",
        );
        let ids = heading_ids(&view.widgets);
        let mut unique = ids.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), ids.len(), "{ids:?}");
    }

    #[test]
    fn test_toc_lists_level_two_to_six_in_order() {
        let markdown = "# Title\n\n[TOC]\n\n## First\n\n### Nested\n\n###### Deepest\n\n## Second\n";
        let view = DocumentRenderer::new().render(markdown);

        let toc: Vec<(u8, &str)> = view
            .toc
            .iter()
            .map(|entry| (entry.level, entry.id.as_str()))
            .collect();
        assert_eq!(
            toc,
            vec![(2, "first"), (3, "nested"), (6, "deepest"), (2, "second")]
        );

        let Widget::TableOfContents(items) = &view.widgets[1] else {
            panic!("expected toc widget, got {:?}", view.widgets[1]);
        };
        assert_eq!(items.len(), 2);
        assert_eq!(
            items[0].children[0].entry.as_ref().map(|e| e.id.as_str()),
            Some("nested")
        );
    }

    #[test]
    fn test_toc_without_eligible_headings_is_empty() {
        let view = DocumentRenderer::new().render("# Only title\n\n[TOC]\n\nBody.\n");
        assert!(view.toc.is_empty());
        assert_eq!(view.widgets[1], Widget::TableOfContents(vec![]));
    }

    #[test]
    fn test_toc_only_first_marker_replaced() {
        let view = DocumentRenderer::new().render("[TOC]\n\n## A\n\n[[toc]]\n");
        assert!(matches!(view.widgets[0], Widget::TableOfContents(_)));
        assert_eq!(
            view.widgets[2],
            Widget::Paragraph(vec![Inline::Text("[[toc]]".to_owned())])
        );
        assert_eq!(view.widgets.len(), 3);
    }

    #[test]
    fn test_toc_marker_in_tight_list_item() {
        let html = DocumentRenderer::new().render("- [TOC]\n\n## A").to_html();
        assert!(
            html.starts_with(r##"<ul><li><nav class="toc"><ul><li><a href="#a">A</a>"##),
            "{html}"
        );
    }

    #[test]
    fn test_loose_task_list_keeps_checkboxes() {
        let view = DocumentRenderer::new().render("- [x] done\n\n- [ ] todo\n");
        let Widget::List { items, .. } = &view.widgets[0] else {
            panic!("expected list, got {:?}", view.widgets);
        };
        assert_eq!(items[0].checked, Some(true));
        assert_eq!(items[1].checked, Some(false));

        let html = view.to_html();
        assert!(html.contains(r#"<input type="checkbox" checked disabled>"#));
        assert!(html.contains(r#"<input type="checkbox" disabled>"#));
    }

    #[test]
    fn test_no_marker_no_toc_widget() {
        let view = DocumentRenderer::new().render("## A\n\n## B\n");
        assert!(
            !view
                .widgets
                .iter()
                .any(|w| matches!(w, Widget::TableOfContents(_)))
        );
        assert_eq!(view.toc.len(), 2);
    }

    #[test]
    fn test_toc_links_match_heading_ids() {
        let view = DocumentRenderer::new().render("## Intro\n\n## Intro\n\n[TOC]\n");
        assert_eq!(
            view.toc,
            vec![
                TocEntry {
                    level: 2,
                    title: "Intro".to_owned(),
                    id: "intro".to_owned(),
                },
                TocEntry {
                    level: 2,
                    title: "Intro".to_owned(),
                    id: "intro-2".to_owned(),
                },
            ]
        );
        let html = view.to_html();
        assert!(html.contains(r##"<a href="#intro-2">Intro</a>"##));
        assert!(html.contains(r#"<h2 id="intro-2">Intro</h2>"#));
    }

    #[test]
    fn test_javascript_is_highlighted() {
        let view = highlighted().render("```javascript\nconst x = 1;\n```\n");
        let Widget::HighlightedCode { language, html } = &view.widgets[0] else {
            panic!("expected highlighted code, got {:?}", view.widgets[0]);
        };
        assert_eq!(language, "javascript");
        assert!(html.contains("<span"));
    }

    #[test]
    fn test_unknown_language_renders_plain() {
        let view = highlighted().render("```unknownlang123\nsome code\n```\n");
        assert_eq!(
            view.widgets,
            vec![Widget::Code {
                language: Some("unknownlang123".to_owned()),
                literal: "some code\n".to_owned(),
            }]
        );
    }

    #[test]
    fn test_untagged_code_renders_plain() {
        let view = highlighted().render("```\nplain\n```\n");
        assert_eq!(
            view.widgets,
            vec![Widget::Code {
                language: None,
                literal: "plain\n".to_owned(),
            }]
        );
    }

    #[test]
    fn test_without_highlighter_code_is_plain() {
        let renderer = DocumentRenderer::new();
        assert!(!renderer.highlights());
        let view = renderer.render("```rust\nfn main() {}\n```\n");
        assert!(matches!(view.widgets[0], Widget::Code { .. }));
    }

    #[test]
    fn test_highlighter_failure_only_affects_its_block() {
        let renderer = DocumentRenderer::new().with_highlighter(FlakyHighlighter);
        let view = renderer.render("```broken\na\n```\n\n```boom\nb\n```\n\n```ok\nc\n```\n");
        assert_eq!(
            view.widgets,
            vec![
                Widget::Code {
                    language: Some("broken".to_owned()),
                    literal: "a\n".to_owned(),
                },
                Widget::Code {
                    language: Some("boom".to_owned()),
                    literal: "b\n".to_owned(),
                },
                Widget::HighlightedCode {
                    language: "ok".to_owned(),
                    html: "<b>c\n</b>".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn test_shared_highlighter() {
        let shared: Arc<dyn Highlighter> = Arc::new(FlakyHighlighter);
        let renderer = DocumentRenderer::new().with_shared_highlighter(Arc::clone(&shared));
        let view = renderer.render("```x\ny\n```\n");
        assert!(matches!(view.widgets[0], Widget::HighlightedCode { .. }));
    }

    #[test]
    fn test_title_from_first_h1() {
        let view = DocumentRenderer::new().render("## Before\n\n# Functional *Programming*\n\n# Second\n");
        assert_eq!(view.title.as_deref(), Some("Functional Programming"));

        let view = DocumentRenderer::new().render("## No title\n");
        assert_eq!(view.title, None);
    }

    #[test]
    fn test_nested_code_blocks_are_mapped() {
        let view = highlighted().render("> ```rust\n> let x = 1;\n> ```\n\n- item\n\n  ```unknownlang123\n  y\n  ```\n");
        let Widget::BlockQuote(children) = &view.widgets[0] else {
            panic!("expected blockquote");
        };
        assert!(matches!(children[0], Widget::HighlightedCode { .. }));
        let Widget::List { items, .. } = &view.widgets[1] else {
            panic!("expected list");
        };
        assert!(matches!(items[0].children[1], Widget::Code { .. }));
    }

    #[test]
    fn test_parse_assigns_ids() {
        let nodes = DocumentRenderer::new().parse("# Hello World\n");
        assert!(matches!(
            &nodes[0],
            DocumentNode::Heading { id, .. } if id == "hello-world"
        ));
    }
}
