//! Markdown document model consumed by the wiki markup renderer.
//!
//! Trees are produced by [`parse_document`](crate::parse_document) from
//! pulldown-cmark events, but the renderer depends only on this model,
//! not on any parser internals.

/// One element of a parsed Markdown document.
///
/// Composite variants carry their children as already-parsed subtrees;
/// leaf variants carry the raw attributes their formatter needs. The set
/// is closed: the renderer matches it exhaustively, so an unhandled kind
/// is a compile error rather than a runtime fallback.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// Root of a parsed document.
    Document(Vec<Node>),
    /// Heading with level 1-6.
    Heading { level: u8, children: Vec<Node> },
    Paragraph(Vec<Node>),
    BlockQuote(Vec<Node>),
    /// Fenced or indented code block; the literal is kept verbatim.
    CodeBlock(String),
    /// Ordered or unordered list.
    List { ordered: bool, items: Vec<Node> },
    /// Single list item; nested lists appear among the children.
    ListItem(Vec<Node>),
    Emphasis(Vec<Node>),
    Strong(Vec<Node>),
    Strikethrough(Vec<Node>),
    /// Inline code span.
    CodeSpan(String),
    /// Inline link. `title` is the optional link title (empty when the
    /// source has none), distinct from the link text in `children`.
    Link {
        url: String,
        title: String,
        children: Vec<Node>,
    },
    Image {
        src: String,
        title: String,
        alt: String,
    },
    /// Bare `<...>` autolink.
    Autolink { url: String, email: bool },
    /// Hard line break.
    LineBreak,
    HorizontalRule,
    /// Literal text, emitted without escaping.
    Text(String),
    HtmlBlock(String),
    HtmlInline(String),
    Table(Vec<Node>),
    TableRow(Vec<Node>),
    TableCell(Vec<Node>),
    /// Reference to a footnote by label.
    FootnoteRef(String),
    /// Single footnote definition.
    FootnoteItem { label: String, children: Vec<Node> },
    /// Collected footnote section emitted by some parsers.
    Footnotes(Vec<Node>),
}
