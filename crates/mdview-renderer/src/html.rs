//! HTML backend for document rendering.
//!
//! Produces semantic HTML5 output suitable for web display.

use std::fmt::Write;

use crate::backend::RenderBackend;
use crate::toc::TocItem;
use crate::util::escape_html;

/// HTML render backend.
///
/// Produces semantic HTML5 with:
/// - `<hN id="...">` for headings
/// - `<pre><code>` for plain code blocks
/// - `<nav class="toc">` for the table of contents
/// - `<blockquote>` for blockquotes
/// - `<img>` for images
pub struct HtmlBackend;

impl RenderBackend for HtmlBackend {
    fn heading(level: u8, id: &str, inner: &str, out: &mut String) {
        write!(out, r#"<h{level} id="{}">{inner}</h{level}>"#, escape_html(id)).unwrap();
    }

    fn code_block(lang: Option<&str>, content: &str, out: &mut String) {
        if let Some(lang) = lang {
            write!(
                out,
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                escape_html(lang),
                escape_html(content)
            )
            .unwrap();
        } else {
            write!(out, "<pre><code>{}</code></pre>", escape_html(content)).unwrap();
        }
    }

    fn highlighted_code_block(lang: &str, html: &str, out: &mut String) {
        write!(
            out,
            r#"<div class="highlight" data-language="{}">{html}</div>"#,
            escape_html(lang)
        )
        .unwrap();
    }

    fn table_of_contents(items: &[TocItem], out: &mut String) {
        out.push_str(r#"<nav class="toc">"#);
        write_toc_list(items, out);
        out.push_str("</nav>");
    }

    fn blockquote_start(out: &mut String) {
        out.push_str("<blockquote>");
    }

    fn blockquote_end(out: &mut String) {
        out.push_str("</blockquote>");
    }

    fn image(src: &str, alt: &str, title: &str, out: &mut String) {
        let title_attr = if title.is_empty() {
            String::new()
        } else {
            format!(r#" title="{}""#, escape_html(title))
        };
        write!(
            out,
            r#"<img src="{}"{title_attr} alt="{}">"#,
            escape_html(src),
            escape_html(alt)
        )
        .unwrap();
    }
}

fn write_toc_list(items: &[TocItem], out: &mut String) {
    out.push_str("<ul>");
    for item in items {
        out.push_str("<li>");
        if let Some(entry) = &item.entry {
            write!(
                out,
                r##"<a href="#{}">{}</a>"##,
                escape_html(&entry.id),
                escape_html(&entry.title)
            )
            .unwrap();
        }
        if !item.children.is_empty() {
            write_toc_list(&item.children, out);
        }
        out.push_str("</li>");
    }
    out.push_str("</ul>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Alignment, Inline};
    use crate::toc::TocEntry;
    use crate::view::{ListItemView, ViewTree, Widget};
    use pretty_assertions::assert_eq;

    fn render(widgets: Vec<Widget>) -> String {
        ViewTree {
            widgets,
            ..ViewTree::default()
        }
        .to_html()
    }

    fn text(s: &str) -> Inline {
        Inline::Text(s.to_owned())
    }

    #[test]
    fn test_heading_with_id() {
        let html = render(vec![Widget::Heading {
            level: 2,
            id: "pure-functions".to_owned(),
            content: vec![text("Pure "), Inline::Emphasis(vec![text("functions")])],
        }]);
        assert_eq!(
            html,
            r#"<h2 id="pure-functions">Pure <em>functions</em></h2>"#
        );
    }

    #[test]
    fn test_code_block_escaped() {
        let html = render(vec![Widget::Code {
            language: Some("unknownlang123".to_owned()),
            literal: "a < b && c\n".to_owned(),
        }]);
        assert_eq!(
            html,
            "<pre><code class=\"language-unknownlang123\">a &lt; b &amp;&amp; c\n</code></pre>"
        );
    }

    #[test]
    fn test_code_block_without_language() {
        let html = render(vec![Widget::Code {
            language: None,
            literal: "plain".to_owned(),
        }]);
        assert_eq!(html, "<pre><code>plain</code></pre>");
    }

    #[test]
    fn test_highlighted_code_passes_html_through() {
        let html = render(vec![Widget::HighlightedCode {
            language: "rust".to_owned(),
            html: "<pre><span>fn</span></pre>".to_owned(),
        }]);
        assert_eq!(
            html,
            r#"<div class="highlight" data-language="rust"><pre><span>fn</span></pre></div>"#
        );
    }

    #[test]
    fn test_table_of_contents_nested() {
        let items = vec![TocItem {
            entry: Some(TocEntry {
                level: 2,
                title: "A & B".to_owned(),
                id: "a-b".to_owned(),
            }),
            children: vec![TocItem {
                entry: None,
                children: vec![TocItem {
                    entry: Some(TocEntry {
                        level: 4,
                        title: "Deep".to_owned(),
                        id: "deep".to_owned(),
                    }),
                    children: vec![],
                }],
            }],
        }];
        let html = render(vec![Widget::TableOfContents(items)]);
        assert_eq!(
            html,
            r##"<nav class="toc"><ul><li><a href="#a-b">A &amp; B</a><ul><li><ul><li><a href="#deep">Deep</a></li></ul></li></ul></li></ul></nav>"##
        );
    }

    #[test]
    fn test_empty_table_of_contents() {
        let html = render(vec![Widget::TableOfContents(vec![])]);
        assert_eq!(html, r#"<nav class="toc"><ul></ul></nav>"#);
    }

    #[test]
    fn test_tight_and_task_list() {
        let html = render(vec![Widget::List {
            ordered: false,
            start: 1,
            tight: true,
            items: vec![
                ListItemView {
                    checked: Some(true),
                    children: vec![Widget::Paragraph(vec![text("done")])],
                },
                ListItemView {
                    checked: None,
                    children: vec![Widget::Paragraph(vec![text("plain")])],
                },
            ],
        }]);
        assert_eq!(
            html,
            r#"<ul><li><input type="checkbox" checked disabled> done</li><li>plain</li></ul>"#
        );
    }

    #[test]
    fn test_loose_ordered_list_with_start() {
        let html = render(vec![Widget::List {
            ordered: true,
            start: 3,
            tight: false,
            items: vec![ListItemView {
                checked: None,
                children: vec![Widget::Paragraph(vec![text("three")])],
            }],
        }]);
        assert_eq!(html, r#"<ol start="3"><li><p>three</p></li></ol>"#);
    }

    #[test]
    fn test_table_alignment() {
        let html = render(vec![Widget::Table {
            alignments: vec![Alignment::Left, Alignment::None],
            head: vec![vec![text("A")], vec![text("B")]],
            rows: vec![vec![vec![text("1")], vec![text("2")]]],
        }]);
        assert_eq!(
            html,
            r#"<table><thead><tr><th style="text-align: left">A</th><th>B</th></tr></thead><tbody><tr><td style="text-align: left">1</td><td>2</td></tr></tbody></table>"#
        );
    }

    #[test]
    fn test_inline_link_image_and_breaks() {
        let html = render(vec![Widget::Paragraph(vec![
            Inline::Link {
                href: "https://example.com/?a=1&b=2".to_owned(),
                title: String::new(),
                content: vec![Inline::Code("map".to_owned())],
            },
            Inline::HardBreak,
            Inline::Image {
                src: "pic.png".to_owned(),
                alt: "a \"pic\"".to_owned(),
                title: "T".to_owned(),
            },
            Inline::SoftBreak,
            Inline::Strikethrough(vec![text("old")]),
        ])]);
        assert_eq!(
            html,
            "<p><a href=\"https://example.com/?a=1&amp;b=2\"><code>map</code></a><br><img src=\"pic.png\" title=\"T\" alt=\"a &quot;pic&quot;\">\n<del>old</del></p>"
        );
    }

    #[test]
    fn test_blockquote_rule_and_html() {
        let html = render(vec![
            Widget::BlockQuote(vec![Widget::Paragraph(vec![text("quoted")])]),
            Widget::Rule,
            Widget::Html("<div>raw</div>".to_owned()),
        ]);
        assert_eq!(
            html,
            "<blockquote><p>quoted</p></blockquote><hr><div>raw</div>"
        );
    }
}
