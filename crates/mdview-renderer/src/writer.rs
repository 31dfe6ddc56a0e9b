//! Widget serialization shared by all backends.

use std::fmt::Write;

use crate::backend::RenderBackend;
use crate::node::{Alignment, Inline};
use crate::util::escape_html;
use crate::view::{ListItemView, Widget};

/// Write a widget sequence to `out`.
pub(crate) fn write_widgets<B: RenderBackend>(widgets: &[Widget], out: &mut String) {
    for widget in widgets {
        write_widget::<B>(widget, out);
    }
}

fn write_widget<B: RenderBackend>(widget: &Widget, out: &mut String) {
    match widget {
        Widget::Heading { level, id, content } => {
            let mut inner = String::new();
            write_inline::<B>(content, &mut inner);
            B::heading(*level, id, &inner, out);
        }
        Widget::Paragraph(content) => {
            out.push_str("<p>");
            write_inline::<B>(content, out);
            out.push_str("</p>");
        }
        Widget::List {
            ordered,
            start,
            tight,
            items,
        } => {
            if !*ordered {
                out.push_str("<ul>");
            } else if *start == 1 {
                out.push_str("<ol>");
            } else {
                write!(out, r#"<ol start="{start}">"#).unwrap();
            }
            for item in items {
                write_list_item::<B>(item, *tight, out);
            }
            out.push_str(if *ordered { "</ol>" } else { "</ul>" });
        }
        Widget::Code { language, literal } => {
            B::code_block(language.as_deref(), literal, out);
        }
        Widget::HighlightedCode { language, html } => {
            B::highlighted_code_block(language, html, out);
        }
        Widget::TableOfContents(items) => B::table_of_contents(items, out),
        Widget::BlockQuote(children) => {
            B::blockquote_start(out);
            write_widgets::<B>(children, out);
            B::blockquote_end(out);
        }
        Widget::Table {
            alignments,
            head,
            rows,
        } => write_table::<B>(alignments, head, rows, out),
        Widget::Rule => B::horizontal_rule(out),
        Widget::Html(html) => out.push_str(html),
    }
}

fn write_list_item<B: RenderBackend>(item: &ListItemView, tight: bool, out: &mut String) {
    out.push_str("<li>");
    if let Some(checked) = item.checked {
        B::task_list_marker(checked, out);
    }
    for child in &item.children {
        match child {
            Widget::Paragraph(content) if tight => write_inline::<B>(content, out),
            _ => write_widget::<B>(child, out),
        }
    }
    out.push_str("</li>");
}

fn write_table<B: RenderBackend>(
    alignments: &[Alignment],
    head: &[Vec<Inline>],
    rows: &[Vec<Vec<Inline>>],
    out: &mut String,
) {
    out.push_str("<table><thead><tr>");
    for (index, cell) in head.iter().enumerate() {
        write_cell::<B>("th", alignments.get(index).copied(), cell, out);
    }
    out.push_str("</tr></thead>");

    if !rows.is_empty() {
        out.push_str("<tbody>");
        for row in rows {
            out.push_str("<tr>");
            for (index, cell) in row.iter().enumerate() {
                write_cell::<B>("td", alignments.get(index).copied(), cell, out);
            }
            out.push_str("</tr>");
        }
        out.push_str("</tbody>");
    }
    out.push_str("</table>");
}

fn write_cell<B: RenderBackend>(
    tag: &str,
    alignment: Option<Alignment>,
    content: &[Inline],
    out: &mut String,
) {
    match alignment.and_then(alignment_style) {
        Some(style) => write!(out, r#"<{tag} style="text-align: {style}">"#).unwrap(),
        None => write!(out, "<{tag}>").unwrap(),
    }
    write_inline::<B>(content, out);
    write!(out, "</{tag}>").unwrap();
}

fn alignment_style(alignment: Alignment) -> Option<&'static str> {
    match alignment {
        Alignment::None => None,
        Alignment::Left => Some("left"),
        Alignment::Center => Some("center"),
        Alignment::Right => Some("right"),
    }
}

/// Write inline content.
pub(crate) fn write_inline<B: RenderBackend>(content: &[Inline], out: &mut String) {
    for inline in content {
        match inline {
            Inline::Text(text) => out.push_str(&escape_html(text)),
            Inline::Code(code) => write!(out, "<code>{}</code>", escape_html(code)).unwrap(),
            Inline::Emphasis(children) => wrap::<B>("em", children, out),
            Inline::Strong(children) => wrap::<B>("strong", children, out),
            Inline::Strikethrough(children) => wrap::<B>("del", children, out),
            Inline::Link {
                href,
                title,
                content,
            } => {
                write!(out, r#"<a href="{}""#, escape_html(href)).unwrap();
                if !title.is_empty() {
                    write!(out, r#" title="{}""#, escape_html(title)).unwrap();
                }
                out.push('>');
                write_inline::<B>(content, out);
                out.push_str("</a>");
            }
            Inline::Image { src, alt, title } => B::image(src, alt, title, out),
            Inline::SoftBreak => out.push('\n'),
            Inline::HardBreak => B::hard_break(out),
            Inline::Html(html) => out.push_str(html),
        }
    }
}

fn wrap<B: RenderBackend>(tag: &str, children: &[Inline], out: &mut String) {
    write!(out, "<{tag}>").unwrap();
    write_inline::<B>(children, out);
    write!(out, "</{tag}>").unwrap();
}
