//! Markdown to [`DocumentNode`] tree conversion.
//!
//! Walks pulldown-cmark events with two stacks: block frames (containers and
//! leaves being built) and inline frames (emphasis, links, images being
//! built). Every event is accepted, so parsing is total.

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

use crate::node::{Alignment, DocumentNode, Inline, ListItem, plain_text};
use crate::util::heading_level_to_num;

/// Paragraph texts that mark where the table of contents goes (compared
/// case-insensitively).
const TOC_MARKERS: &[&str] = &["[toc]", "[[toc]]"];

/// Markdown extensions enabled for every document.
pub(crate) fn parser_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

/// Parse markdown into a document tree.
///
/// Never fails: malformed input degrades to paragraphs of literal text, and
/// an empty document yields a single empty paragraph. Heading ids are left
/// empty; [`crate::assign_heading_ids`] fills them.
#[must_use]
pub fn parse_document(content: &str) -> Vec<DocumentNode> {
    let mut builder = TreeBuilder::new();
    for (event, range) in Parser::new_ext(content, parser_options()).into_offset_iter() {
        builder.event(event, range.start);
    }
    builder.finish()
}

/// Extract the language tag from a fence info string.
///
/// `"rust ignore"` and `"rust,ignore"` both yield `rust`.
pub(crate) fn fence_language(info: &str) -> Option<String> {
    let language = info
        .split(|c: char| c.is_whitespace() || c == ',')
        .next()
        .unwrap_or("")
        .trim_start_matches('.');
    (!language.is_empty()).then(|| language.to_owned())
}

/// Block being built.
enum BlockFrame {
    Root(Vec<DocumentNode>),
    BlockQuote(Vec<DocumentNode>),
    List {
        ordered: bool,
        start: u64,
        tight: bool,
        items: Vec<ListItem>,
    },
    Item(ListItem),
    Table {
        alignments: Vec<Alignment>,
        head: Vec<Vec<Inline>>,
        rows: Vec<Vec<Vec<Inline>>>,
        row: Vec<Vec<Inline>>,
    },
    Heading(u8),
    Paragraph(usize),
    TableCell,
    CodeBlock {
        language: Option<String>,
        literal: String,
    },
    HtmlBlock(String),
}

/// Inline container being built.
enum InlineFrame {
    Root,
    Emphasis,
    Strong,
    Strikethrough,
    Link { href: String, title: String },
    Image { src: String, title: String },
}

struct InlineBuffer {
    frame: InlineFrame,
    content: Vec<Inline>,
}

struct TreeBuilder {
    blocks: Vec<BlockFrame>,
    inlines: Vec<InlineBuffer>,
    /// Source offset of the first event in the open inline run.
    inline_offset: usize,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            blocks: vec![BlockFrame::Root(Vec::new())],
            inlines: Vec::new(),
            inline_offset: 0,
        }
    }

    fn event(&mut self, event: Event<'_>, offset: usize) {
        if self.inlines.is_empty() {
            self.inline_offset = offset;
        }
        match event {
            Event::Start(tag) => self.start_tag(tag, offset),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) | Event::InlineMath(text) | Event::DisplayMath(text) => {
                self.text(&text);
            }
            Event::Code(code) => self.current_inline().push(Inline::Code(code.into_string())),
            Event::Html(html) => self.html(&html),
            Event::InlineHtml(html) => self.current_inline().push(Inline::Html(html.into_string())),
            Event::SoftBreak => self.current_inline().push(Inline::SoftBreak),
            Event::HardBreak => self.current_inline().push(Inline::HardBreak),
            Event::Rule => {
                self.flush_loose_inline();
                self.push_block(DocumentNode::Rule);
            }
            Event::TaskListMarker(checked) => {
                // Loose items open their paragraph before the marker
                let item = self.blocks.iter_mut().rev().find_map(|frame| match frame {
                    BlockFrame::Item(item) => Some(item),
                    _ => None,
                });
                if let Some(item) = item {
                    item.checked = Some(checked);
                }
            }
            Event::FootnoteReference(_) => {
                // Not supported
            }
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>, offset: usize) {
        match tag {
            Tag::Paragraph => {
                self.flush_loose_inline();
                self.mark_list_loose();
                self.blocks.push(BlockFrame::Paragraph(offset));
            }
            Tag::Heading { level, .. } => {
                self.flush_loose_inline();
                self.blocks
                    .push(BlockFrame::Heading(heading_level_to_num(level)));
            }
            Tag::BlockQuote(_) => {
                self.flush_loose_inline();
                self.blocks.push(BlockFrame::BlockQuote(Vec::new()));
            }
            Tag::CodeBlock(kind) => {
                self.flush_loose_inline();
                let language = match kind {
                    CodeBlockKind::Fenced(info) => fence_language(&info),
                    CodeBlockKind::Indented => None,
                };
                self.blocks.push(BlockFrame::CodeBlock {
                    language,
                    literal: String::new(),
                });
            }
            Tag::HtmlBlock => {
                self.flush_loose_inline();
                self.blocks.push(BlockFrame::HtmlBlock(String::new()));
            }
            Tag::List(start) => {
                self.flush_loose_inline();
                self.blocks.push(BlockFrame::List {
                    ordered: start.is_some(),
                    start: start.unwrap_or(1),
                    tight: true,
                    items: Vec::new(),
                });
            }
            Tag::Item => self.blocks.push(BlockFrame::Item(ListItem::default())),
            Tag::Table(alignments) => {
                self.flush_loose_inline();
                self.blocks.push(BlockFrame::Table {
                    alignments: alignments.into_iter().map(Alignment::from).collect(),
                    head: Vec::new(),
                    rows: Vec::new(),
                    row: Vec::new(),
                });
            }
            Tag::TableCell => self.blocks.push(BlockFrame::TableCell),
            Tag::Emphasis => self.open_inline(InlineFrame::Emphasis),
            Tag::Strong => self.open_inline(InlineFrame::Strong),
            Tag::Strikethrough => self.open_inline(InlineFrame::Strikethrough),
            Tag::Link {
                dest_url, title, ..
            } => self.open_inline(InlineFrame::Link {
                href: dest_url.into_string(),
                title: title.into_string(),
            }),
            Tag::Image {
                dest_url, title, ..
            } => self.open_inline(InlineFrame::Image {
                src: dest_url.into_string(),
                title: title.into_string(),
            }),
            Tag::TableHead
            | Tag::TableRow
            | Tag::FootnoteDefinition(_)
            | Tag::MetadataBlock(_)
            | Tag::DefinitionList
            | Tag::DefinitionListTitle
            | Tag::DefinitionListDefinition
            | Tag::Superscript
            | Tag::Subscript => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph
            | TagEnd::Heading(_)
            | TagEnd::BlockQuote(_)
            | TagEnd::CodeBlock
            | TagEnd::HtmlBlock
            | TagEnd::List(_)
            | TagEnd::Item
            | TagEnd::Table
            | TagEnd::TableCell => self.end_block(),
            TagEnd::TableHead => {
                if let Some(BlockFrame::Table { head, row, .. }) = self.blocks.last_mut() {
                    *head = std::mem::take(row);
                }
            }
            TagEnd::TableRow => {
                if let Some(BlockFrame::Table { rows, row, .. }) = self.blocks.last_mut() {
                    rows.push(std::mem::take(row));
                }
            }
            TagEnd::Emphasis
            | TagEnd::Strong
            | TagEnd::Strikethrough
            | TagEnd::Link
            | TagEnd::Image => self.close_inline(),
            TagEnd::FootnoteDefinition
            | TagEnd::MetadataBlock(_)
            | TagEnd::DefinitionList
            | TagEnd::DefinitionListTitle
            | TagEnd::DefinitionListDefinition
            | TagEnd::Superscript
            | TagEnd::Subscript => {}
        }
    }

    fn text(&mut self, text: &str) {
        match self.blocks.last_mut() {
            Some(BlockFrame::CodeBlock { literal, .. }) => literal.push_str(text),
            Some(BlockFrame::HtmlBlock(html)) => html.push_str(text),
            _ => {
                // pulldown-cmark splits text around brackets; keep it in one node
                let content = self.current_inline();
                if let Some(Inline::Text(previous)) = content.last_mut() {
                    previous.push_str(text);
                } else {
                    content.push(Inline::Text(text.to_owned()));
                }
            }
        }
    }

    fn html(&mut self, html: &str) {
        if let Some(BlockFrame::HtmlBlock(buffer)) = self.blocks.last_mut() {
            buffer.push_str(html);
        } else {
            self.current_inline().push(Inline::Html(html.to_owned()));
        }
    }

    /// Inline content of the innermost open inline frame.
    fn current_inline(&mut self) -> &mut Vec<Inline> {
        if self.inlines.is_empty() {
            self.inlines.push(InlineBuffer {
                frame: InlineFrame::Root,
                content: Vec::new(),
            });
        }
        let last = self.inlines.len() - 1;
        &mut self.inlines[last].content
    }

    fn open_inline(&mut self, frame: InlineFrame) {
        self.current_inline();
        self.inlines.push(InlineBuffer {
            frame,
            content: Vec::new(),
        });
    }

    fn close_inline(&mut self) {
        if self.inlines.len() < 2 {
            return;
        }
        let Some(buffer) = self.inlines.pop() else {
            return;
        };
        let inline = match buffer.frame {
            InlineFrame::Root => {
                self.inlines.push(buffer);
                return;
            }
            InlineFrame::Emphasis => Inline::Emphasis(buffer.content),
            InlineFrame::Strong => Inline::Strong(buffer.content),
            InlineFrame::Strikethrough => Inline::Strikethrough(buffer.content),
            InlineFrame::Link { href, title } => Inline::Link {
                href,
                title,
                content: buffer.content,
            },
            InlineFrame::Image { src, title } => Inline::Image {
                src,
                alt: plain_text(&buffer.content),
                title,
            },
        };
        self.current_inline().push(inline);
    }

    /// Close all open inline frames and return the collected content.
    fn take_inline(&mut self) -> Vec<Inline> {
        while self.inlines.len() > 1 {
            self.close_inline();
        }
        self.inlines
            .pop()
            .map(|buffer| buffer.content)
            .unwrap_or_default()
    }

    /// Wrap inline content sitting directly in a container (tight list item
    /// text) into a paragraph before another block starts.
    fn flush_loose_inline(&mut self) {
        if self.inlines.is_empty() {
            return;
        }
        if matches!(
            self.blocks.last(),
            Some(BlockFrame::Root(_) | BlockFrame::BlockQuote(_) | BlockFrame::Item(_))
        ) {
            let offset = self.inline_offset;
            let content = self.take_inline();
            self.push_block(paragraph_node(content, offset));
        }
    }

    /// A paragraph directly inside a list item makes the list loose.
    fn mark_list_loose(&mut self) {
        let len = self.blocks.len();
        if len < 2 || !matches!(self.blocks[len - 1], BlockFrame::Item(_)) {
            return;
        }
        if let BlockFrame::List { tight, .. } = &mut self.blocks[len - 2] {
            *tight = false;
        }
    }

    fn end_block(&mut self) {
        self.flush_loose_inline();
        let Some(frame) = self.blocks.pop() else {
            return;
        };
        let node = match frame {
            BlockFrame::Root(children) => {
                // Unbalanced end event; the root is never closed early
                self.blocks.push(BlockFrame::Root(children));
                return;
            }
            BlockFrame::Paragraph(offset) => paragraph_node(self.take_inline(), offset),
            BlockFrame::Heading(level) => DocumentNode::Heading {
                level,
                content: self.take_inline(),
                id: String::new(),
            },
            BlockFrame::BlockQuote(children) => DocumentNode::BlockQuote(children),
            BlockFrame::List {
                ordered,
                start,
                tight,
                items,
            } => DocumentNode::List {
                ordered,
                start,
                tight,
                items,
            },
            BlockFrame::Item(item) => {
                if let Some(BlockFrame::List { items, .. }) = self.blocks.last_mut() {
                    items.push(item);
                } else {
                    self.push_block(DocumentNode::List {
                        ordered: false,
                        start: 1,
                        tight: true,
                        items: vec![item],
                    });
                }
                return;
            }
            BlockFrame::Table {
                alignments,
                head,
                rows,
                ..
            } => DocumentNode::Table {
                alignments,
                head,
                rows,
            },
            BlockFrame::TableCell => {
                let cell = self.take_inline();
                if let Some(BlockFrame::Table { row, .. }) = self.blocks.last_mut() {
                    row.push(cell);
                }
                return;
            }
            BlockFrame::CodeBlock { language, literal } => {
                DocumentNode::CodeBlock { language, literal }
            }
            BlockFrame::HtmlBlock(html) => DocumentNode::Html(html),
        };
        self.push_block(node);
    }

    fn push_block(&mut self, node: DocumentNode) {
        match self.blocks.last_mut() {
            Some(BlockFrame::Root(children) | BlockFrame::BlockQuote(children)) => {
                children.push(node);
            }
            Some(BlockFrame::Item(item)) => item.children.push(node),
            _ => {
                if let Some(BlockFrame::Root(children)) = self.blocks.first_mut() {
                    children.push(node);
                }
            }
        }
    }

    fn finish(mut self) -> Vec<DocumentNode> {
        while self.blocks.len() > 1 {
            self.end_block();
        }
        self.flush_loose_inline();

        let mut nodes = match self.blocks.pop() {
            Some(BlockFrame::Root(children)) => children,
            _ => Vec::new(),
        };
        if nodes.is_empty() {
            nodes.push(DocumentNode::Paragraph(Vec::new()));
        }
        nodes
    }
}

/// Build a paragraph node, recognizing a table of contents marker.
fn paragraph_node(content: Vec<Inline>, offset: usize) -> DocumentNode {
    if let [Inline::Text(text)] = content.as_slice() {
        let marker = text.trim();
        if TOC_MARKERS
            .iter()
            .any(|candidate| marker.eq_ignore_ascii_case(candidate))
        {
            return DocumentNode::TableOfContents {
                offset,
                marker: marker.to_owned(),
            };
        }
    }
    DocumentNode::Paragraph(content)
}
