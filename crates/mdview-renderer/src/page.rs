//! Standalone HTML page around a rendered document.
//!
//! The stylesheet is embedded so a page written by the CLI opens correctly
//! from disk without any other assets.

use std::fmt::Write;

use crate::util::escape_html;
use crate::view::ViewTree;

/// Title used when the document has no H1.
pub const DEFAULT_TITLE: &str = "Document";

/// Embedded stylesheet for document pages.
pub const STYLESHEET: &str = r#"
:root {
  --text: #1f2328;
  --muted: #59636e;
  --border: #d1d9e0;
  --accent: #0969da;
  --code-bg: #f6f8fa;
}
* { box-sizing: border-box; }
body {
  margin: 0;
  color: var(--text);
  background: #fff;
  font: 16px/1.6 -apple-system, BlinkMacSystemFont, "Segoe UI", Helvetica, Arial, sans-serif;
}
main { max-width: 48rem; margin: 0 auto; padding: 2rem 1.25rem 4rem; }
h1, h2, h3, h4, h5, h6 { line-height: 1.25; margin: 1.75em 0 0.6em; scroll-margin-top: 1rem; }
h1 { font-size: 2.1rem; border-bottom: 1px solid var(--border); padding-bottom: 0.3em; margin-top: 0; }
h2 { font-size: 1.55rem; border-bottom: 1px solid var(--border); padding-bottom: 0.3em; }
h3 { font-size: 1.25rem; }
a { color: var(--accent); text-decoration: none; }
a:hover { text-decoration: underline; }
code { font-family: ui-monospace, SFMono-Regular, Menlo, Consolas, monospace; font-size: 0.875em; }
:not(pre) > code { background: var(--code-bg); padding: 0.15em 0.35em; border-radius: 4px; }
pre { background: var(--code-bg); padding: 1rem; border-radius: 6px; overflow-x: auto; line-height: 1.45; }
.highlight pre { border: 1px solid var(--border); }
blockquote { margin: 0; padding: 0 1em; color: var(--muted); border-left: 0.25em solid var(--border); }
table { border-collapse: collapse; margin: 1em 0; }
th, td { border: 1px solid var(--border); padding: 0.4em 0.8em; }
th { background: var(--code-bg); }
hr { border: 0; border-top: 1px solid var(--border); margin: 2em 0; }
img { max-width: 100%; }
nav.toc { background: var(--code-bg); border: 1px solid var(--border); border-radius: 6px; padding: 0.75rem 1.25rem; margin: 1.5em 0; }
nav.toc ul { list-style: none; padding-left: 1.1rem; margin: 0.2em 0; }
nav.toc > ul { padding-left: 0; }
.error { border: 1px solid #ff818266; background: #ffebe9; color: #82071e; padding: 1rem 1.25rem; border-radius: 6px; }
.error code { background: transparent; }
"#;

/// Render a rendered document as a complete HTML page.
pub fn render_page(view: &ViewTree) -> String {
    let title = view.title.as_deref().unwrap_or(DEFAULT_TITLE);
    let mut html = String::with_capacity(8192);
    open_page(&mut html, title);
    html.push_str("<article class=\"markdown-body\">\n");
    html.push_str(&view.to_html());
    html.push_str("\n</article>\n");
    close_page(&mut html);
    html
}

/// Render the page shown when the document could not be loaded.
pub fn render_error_page(location: &str, message: &str) -> String {
    let mut html = String::with_capacity(2048);
    open_page(&mut html, "Failed to load document");
    html.push_str("<div class=\"error\" role=\"alert\">\n");
    html.push_str("<h1>Failed to load document</h1>\n");
    writeln!(html, "<p><code>{}</code></p>", escape_html(location)).unwrap();
    writeln!(html, "<p>{}</p>", escape_html(message)).unwrap();
    html.push_str("</div>\n");
    close_page(&mut html);
    html
}

fn open_page(html: &mut String, title: &str) {
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    writeln!(html, "<title>{}</title>", escape_html(title)).unwrap();
    html.push_str("<style>");
    html.push_str(STYLESHEET);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n<main>\n");
}

fn close_page(html: &mut String) {
    html.push_str("</main>\n</body>\n</html>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::DocumentRenderer;

    #[test]
    fn test_render_page_uses_h1_title() {
        let view = DocumentRenderer::new().render("# Monads & Functors\n\nText.\n");
        let html = render_page(&view);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Monads &amp; Functors</title>"));
        assert!(html.contains("<style>"));
        assert!(html.contains(r#"<h1 id="monads-functors">Monads &amp; Functors</h1>"#));
        assert!(html.ends_with("</html>\n"));
    }

    #[test]
    fn test_render_page_default_title() {
        let view = DocumentRenderer::new().render("Just text.\n");
        assert!(render_page(&view).contains("<title>Document</title>"));
    }

    #[test]
    fn test_render_error_page_escapes() {
        let html = render_error_page("https://example.com/doc.md", "HTTP 500: <oops>");
        assert!(html.contains("Failed to load document"));
        assert!(html.contains("<code>https://example.com/doc.md</code>"));
        assert!(html.contains("HTTP 500: &lt;oops&gt;"));
        assert!(!html.contains("<oops>"));
    }
}
