//! Render backend trait for format-specific rendering.
//!
//! The widget writer handles shared elements (paragraphs, lists, tables,
//! inline formatting) itself and delegates the elements whose markup differs
//! between outputs to the backend.

use crate::toc::TocItem;

/// Backend trait for format-specific rendering operations.
///
/// Implementations provide format-specific rendering for:
/// - Headings with anchors
/// - Code blocks, plain and highlighted
/// - The generated table of contents
/// - Blockquotes and images
pub trait RenderBackend {
    /// Render a heading with its anchor id.
    ///
    /// # Arguments
    ///
    /// * `level` - Heading level (1-6)
    /// * `id` - Stable anchor id
    /// * `inner` - Already rendered inline content
    /// * `out` - Output buffer to write to
    fn heading(level: u8, id: &str, inner: &str, out: &mut String);

    /// Render a plain code block.
    ///
    /// # Arguments
    ///
    /// * `lang` - Optional language identifier (e.g., "rust", "python")
    /// * `content` - The code content
    /// * `out` - Output buffer to write to
    fn code_block(lang: Option<&str>, content: &str, out: &mut String);

    /// Render a code block already colorized by the highlighter.
    fn highlighted_code_block(lang: &str, html: &str, out: &mut String);

    /// Render the nested table of contents.
    fn table_of_contents(items: &[TocItem], out: &mut String);

    /// Render blockquote start tag.
    fn blockquote_start(out: &mut String);

    /// Render blockquote end tag.
    fn blockquote_end(out: &mut String);

    /// Render an image.
    fn image(src: &str, alt: &str, title: &str, out: &mut String);

    /// Render a hard break.
    ///
    /// Default uses `<br>`. Override for format-specific rendering (e.g., `<br />`).
    fn hard_break(out: &mut String) {
        out.push_str("<br>");
    }

    /// Render a horizontal rule.
    ///
    /// Default uses `<hr>`. Override for format-specific rendering (e.g., `<hr />`).
    fn horizontal_rule(out: &mut String) {
        out.push_str("<hr>");
    }

    /// Render a task list marker.
    ///
    /// Default uses HTML checkbox. Override for format-specific rendering.
    fn task_list_marker(checked: bool, out: &mut String) {
        if checked {
            out.push_str(r#"<input type="checkbox" checked disabled> "#);
        } else {
            out.push_str(r#"<input type="checkbox" disabled> "#);
        }
    }
}
