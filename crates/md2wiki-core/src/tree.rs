//! Builds the document model from pulldown-cmark events.
//!
//! This is the only module that touches the parser; everything
//! downstream consumes [`Node`] trees and stays parser-agnostic.

use pulldown_cmark::{Event, HeadingLevel, LinkType, Options, Parser, Tag, TagEnd};

use crate::node::Node;

/// Parser options for the supported Markdown dialect.
///
/// Tables and footnotes are enabled so those constructs reach the
/// renderer as structured nodes instead of leaking through as text.
fn parser_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_FOOTNOTES
}

/// Parse Markdown source into a document tree.
#[must_use]
pub fn parse_document(markdown: &str) -> Node {
    let mut builder = TreeBuilder::new();
    for event in Parser::new_ext(markdown, parser_options()) {
        builder.process_event(event);
    }
    builder.finish()
}

/// Container node currently being assembled.
enum OpenNode {
    Document,
    Heading { level: u8 },
    Paragraph,
    BlockQuote,
    CodeBlock { code: String },
    HtmlBlock { html: String },
    List { ordered: bool },
    ListItem,
    Emphasis,
    Strong,
    Strikethrough,
    Link { url: String, title: String },
    Autolink { url: String, email: bool },
    Image { src: String, title: String },
    Table,
    TableRow,
    TableCell,
    FootnoteItem { label: String },
}

struct Frame {
    open: OpenNode,
    children: Vec<Node>,
}

impl Frame {
    fn into_node(self) -> Node {
        let children = self.children;
        match self.open {
            OpenNode::Document => Node::Document(children),
            OpenNode::Heading { level } => Node::Heading { level, children },
            OpenNode::Paragraph => Node::Paragraph(children),
            OpenNode::BlockQuote => Node::BlockQuote(children),
            OpenNode::CodeBlock { code } => Node::CodeBlock(code),
            OpenNode::HtmlBlock { html } => Node::HtmlBlock(html),
            OpenNode::List { ordered } => Node::List {
                ordered,
                items: children,
            },
            OpenNode::ListItem => Node::ListItem(children),
            OpenNode::Emphasis => Node::Emphasis(children),
            OpenNode::Strong => Node::Strong(children),
            OpenNode::Strikethrough => Node::Strikethrough(children),
            OpenNode::Link { url, title } => Node::Link {
                url,
                title,
                children,
            },
            OpenNode::Autolink { url, email } => Node::Autolink { url, email },
            OpenNode::Image { src, title } => Node::Image {
                src,
                title,
                alt: plain_text(&children),
            },
            OpenNode::Table => Node::Table(children),
            OpenNode::TableRow => Node::TableRow(children),
            OpenNode::TableCell => Node::TableCell(children),
            OpenNode::FootnoteItem { label } => Node::FootnoteItem { label, children },
        }
    }
}

/// Event-driven builder keeping a stack of open container frames.
struct TreeBuilder {
    stack: Vec<Frame>,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            stack: vec![Frame {
                open: OpenNode::Document,
                children: Vec::new(),
            }],
        }
    }

    fn finish(mut self) -> Node {
        debug_assert_eq!(self.stack.len(), 1, "unbalanced parser events");
        let children = self
            .stack
            .pop()
            .map(|frame| frame.children)
            .unwrap_or_default();
        Node::Document(children)
    }

    fn process_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.push_node(Node::CodeSpan(code.to_string())),
            Event::Html(html) | Event::InlineHtml(html) => self.html(&html),
            Event::FootnoteReference(label) => self.push_node(Node::FootnoteRef(label.to_string())),
            Event::SoftBreak => self.text("\n"),
            Event::HardBreak => self.push_node(Node::LineBreak),
            Event::Rule => self.push_node(Node::HorizontalRule),
            // Not part of the supported dialect; the configured parser
            // options never produce these.
            Event::TaskListMarker(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {}
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => self.open(OpenNode::Paragraph),
            Tag::Heading { level, .. } => self.open(OpenNode::Heading {
                level: heading_level_to_num(level),
            }),
            Tag::BlockQuote(_) => self.open(OpenNode::BlockQuote),
            // Fence info is ignored: the wiki code macro has a fixed
            // theme and no language parameter.
            Tag::CodeBlock(_) => self.open(OpenNode::CodeBlock {
                code: String::new(),
            }),
            Tag::HtmlBlock => self.open(OpenNode::HtmlBlock {
                html: String::new(),
            }),
            Tag::List(start) => self.open(OpenNode::List {
                ordered: start.is_some(),
            }),
            Tag::Item => self.open(OpenNode::ListItem),
            Tag::Emphasis => self.open(OpenNode::Emphasis),
            Tag::Strong => self.open(OpenNode::Strong),
            Tag::Strikethrough => self.open(OpenNode::Strikethrough),
            Tag::Link {
                link_type,
                dest_url,
                title,
                ..
            } => match link_type {
                // pulldown-cmark prefixes email destinations with
                // mailto:; the formatter re-adds it.
                LinkType::Email => self.open(OpenNode::Autolink {
                    url: dest_url
                        .strip_prefix("mailto:")
                        .unwrap_or(&dest_url)
                        .to_owned(),
                    email: true,
                }),
                LinkType::Autolink => self.open(OpenNode::Autolink {
                    url: dest_url.to_string(),
                    email: false,
                }),
                _ => self.open(OpenNode::Link {
                    url: dest_url.to_string(),
                    title: title.to_string(),
                }),
            },
            Tag::Image {
                dest_url, title, ..
            } => self.open(OpenNode::Image {
                src: dest_url.to_string(),
                title: title.to_string(),
            }),
            Tag::FootnoteDefinition(label) => self.open(OpenNode::FootnoteItem {
                label: label.to_string(),
            }),
            Tag::Table(_) => self.open(OpenNode::Table),
            Tag::TableHead | Tag::TableRow => self.open(OpenNode::TableRow),
            Tag::TableCell => self.open(OpenNode::TableCell),
            // Not produced with the configured parser options.
            Tag::DefinitionList
            | Tag::DefinitionListTitle
            | Tag::DefinitionListDefinition
            | Tag::Superscript
            | Tag::Subscript
            | Tag::MetadataBlock(_) => {}
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
            | TagEnd::Emphasis
            | TagEnd::Strong
            | TagEnd::Strikethrough
            | TagEnd::Link
            | TagEnd::Image
            | TagEnd::FootnoteDefinition
            | TagEnd::Table
            | TagEnd::TableHead
            | TagEnd::TableRow
            | TagEnd::TableCell => self.close(),
            // Mirrors the ignored start tags.
            TagEnd::DefinitionList
            | TagEnd::DefinitionListTitle
            | TagEnd::DefinitionListDefinition
            | TagEnd::Superscript
            | TagEnd::Subscript
            | TagEnd::MetadataBlock(_) => {}
        }
    }

    fn text(&mut self, text: &str) {
        match self.stack.last_mut() {
            Some(Frame {
                open: OpenNode::CodeBlock { code },
                ..
            }) => code.push_str(text),
            Some(Frame {
                open: OpenNode::HtmlBlock { html },
                ..
            }) => html.push_str(text),
            _ => self.push_node(Node::Text(text.to_owned())),
        }
    }

    fn html(&mut self, html: &str) {
        if let Some(Frame {
            open: OpenNode::HtmlBlock { html: buffer },
            ..
        }) = self.stack.last_mut()
        {
            buffer.push_str(html);
        } else {
            self.push_node(Node::HtmlInline(html.to_owned()));
        }
    }

    fn open(&mut self, open: OpenNode) {
        self.stack.push(Frame {
            open,
            children: Vec::new(),
        });
    }

    fn close(&mut self) {
        if let Some(frame) = self.stack.pop() {
            self.push_node(frame.into_node());
        }
    }

    fn push_node(&mut self, node: Node) {
        if let Some(frame) = self.stack.last_mut() {
            frame.children.push(node);
        }
    }
}

fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Flatten a subtree to its literal text, used for image alt text.
fn plain_text(children: &[Node]) -> String {
    let mut out = String::new();
    collect_text(children, &mut out);
    out
}

fn collect_text(children: &[Node], out: &mut String) {
    for child in children {
        match child {
            Node::Text(text) | Node::CodeSpan(text) => out.push_str(text),
            Node::Emphasis(inner) | Node::Strong(inner) | Node::Strikethrough(inner) => {
                collect_text(inner, out);
            }
            Node::Link { children, .. } => collect_text(children, out),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn builds_heading_and_paragraph() {
        let document = parse_document("# Title\n\nbody");
        assert_eq!(
            document,
            Node::Document(vec![
                Node::Heading {
                    level: 1,
                    children: vec![Node::Text("Title".to_owned())],
                },
                Node::Paragraph(vec![Node::Text("body".to_owned())]),
            ])
        );
    }

    #[test]
    fn nested_list_hangs_off_its_item() {
        let document = parse_document("- A\n  - B");
        assert_eq!(
            document,
            Node::Document(vec![Node::List {
                ordered: false,
                items: vec![Node::ListItem(vec![
                    Node::Text("A".to_owned()),
                    Node::List {
                        ordered: false,
                        items: vec![Node::ListItem(vec![Node::Text("B".to_owned())])],
                    },
                ])],
            }])
        );
    }

    #[test]
    fn image_alt_text_is_flattened() {
        let document = parse_document("![the *alt*](img.png)");
        assert_eq!(
            document,
            Node::Document(vec![Node::Paragraph(vec![Node::Image {
                src: "img.png".to_owned(),
                title: String::new(),
                alt: "the alt".to_owned(),
            }])])
        );
    }

    #[test]
    fn email_autolink_keeps_bare_address() {
        let document = parse_document("<user@example.com>");
        assert_eq!(
            document,
            Node::Document(vec![Node::Paragraph(vec![Node::Autolink {
                url: "user@example.com".to_owned(),
                email: true,
            }])])
        );
    }

    #[test]
    fn code_block_literal_accumulates_verbatim() {
        let document = parse_document("```rust\nlet x = 1;\nlet y = 2;\n```");
        assert_eq!(
            document,
            Node::Document(vec![Node::CodeBlock("let x = 1;\nlet y = 2;\n".to_owned())])
        );
    }

    #[test]
    fn empty_input_builds_empty_document() {
        assert_eq!(parse_document(""), Node::Document(vec![]));
    }
}
