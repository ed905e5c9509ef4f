//! Post-order document renderer producing Confluence wiki markup.

use crate::error::{RenderError, UnsupportedKind};
use crate::markup;
use crate::node::Node;

/// Per-render state threaded through one traversal.
///
/// Tracks the stack of open lists so item markers can be derived from
/// nesting depth. Every call to [`render`] starts from a fresh context;
/// contexts are never shared between renders.
#[derive(Default)]
struct RenderContext {
    /// Stack of open list types (true = ordered, false = unordered).
    list_stack: Vec<bool>,
}

impl RenderContext {
    /// Marker prefix for an item of the innermost open list: one marker
    /// character per ancestor list, `#` for ordered and `*` for
    /// unordered. A depth-3 unordered item gets `***`.
    fn item_marker(&self) -> String {
        self.list_stack
            .iter()
            .map(|&ordered| if ordered { '#' } else { '*' })
            .collect()
    }
}

/// Render a document tree to Confluence wiki markup.
///
/// Children are always rendered before their parent combines the
/// fragments. The result may start and end with blank lines; trimming
/// them is the caller's concern (see [`convert`](crate::convert)).
///
/// # Errors
///
/// Returns [`RenderError::UnsupportedConstruct`] for raw HTML and table
/// nodes, and [`RenderError::InvalidHeading`] for heading levels below 1.
pub fn render(document: &Node) -> Result<String, RenderError> {
    let mut cx = RenderContext::default();
    render_node(document, &mut cx)
}

fn render_children(children: &[Node], cx: &mut RenderContext) -> Result<String, RenderError> {
    let mut out = String::new();
    for child in children {
        out.push_str(&render_node(child, cx)?);
    }
    Ok(out)
}

fn render_node(node: &Node, cx: &mut RenderContext) -> Result<String, RenderError> {
    match node {
        Node::Document(children) => render_children(children, cx),
        Node::Heading { level, children } => {
            let inner = render_children(children, cx)?;
            markup::heading(*level, &inner)
        }
        Node::Paragraph(children) => Ok(markup::paragraph(&render_children(children, cx)?)),
        Node::BlockQuote(children) => Ok(markup::block_quote(&render_children(children, cx)?)),
        Node::CodeBlock(code) => Ok(markup::code_block(code)),
        Node::List { ordered, items } => {
            cx.list_stack.push(*ordered);
            let body = render_children(items, cx);
            cx.list_stack.pop();
            Ok(markup::list(&body?))
        }
        Node::ListItem(children) => {
            let marker = cx.item_marker();
            let inner = render_children(children, cx)?;
            Ok(markup::list_item(&inner, &marker))
        }
        Node::Emphasis(children) => Ok(markup::emphasis(&render_children(children, cx)?)),
        Node::Strong(children) => Ok(markup::strong(&render_children(children, cx)?)),
        Node::Strikethrough(children) => {
            Ok(markup::strikethrough(&render_children(children, cx)?))
        }
        Node::CodeSpan(text) => Ok(markup::code_span(text)),
        Node::Link {
            url,
            title,
            children,
        } => {
            // The wiki link template carries the title, not the link text.
            let _text = render_children(children, cx)?;
            Ok(markup::link(url, title))
        }
        Node::Image { src, title, alt } => Ok(markup::image(src, title, alt)),
        Node::Autolink { url, email } => Ok(markup::autolink(url, *email)),
        Node::LineBreak => Ok(markup::LINE_BREAK.to_owned()),
        Node::HorizontalRule => Ok(markup::HORIZONTAL_RULE.to_owned()),
        Node::Text(text) => Ok(text.clone()),
        Node::HtmlBlock(_) => Err(unsupported(UnsupportedKind::BlockHtml)),
        Node::HtmlInline(_) => Err(unsupported(UnsupportedKind::InlineHtml)),
        Node::Table(_) => Err(unsupported(UnsupportedKind::Table)),
        Node::TableRow(_) => Err(unsupported(UnsupportedKind::TableRow)),
        Node::TableCell(_) => Err(unsupported(UnsupportedKind::TableCell)),
        // Footnotes degrade to nothing instead of failing the render.
        Node::FootnoteRef(_) | Node::FootnoteItem { .. } | Node::Footnotes(_) => {
            Ok(String::new())
        }
    }
}

fn unsupported(kind: UnsupportedKind) -> RenderError {
    RenderError::UnsupportedConstruct { kind }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{convert, parse_document};

    fn render_markdown(markdown: &str) -> String {
        convert(markdown).unwrap()
    }

    #[test]
    fn heading_levels() {
        for level in 1..=6usize {
            let markdown = format!("{} Title", "#".repeat(level));
            assert_eq!(render_markdown(&markdown), format!("h{level}. Title"));
        }
    }

    #[test]
    fn heading_above_six_is_clamped() {
        let node = Node::Heading {
            level: 9,
            children: vec![Node::Text("x".to_owned())],
        };
        assert_eq!(render(&node).unwrap(), "\nh6. x\n");
    }

    #[test]
    fn heading_level_zero_is_rejected() {
        let node = Node::Heading {
            level: 0,
            children: vec![Node::Text("x".to_owned())],
        };
        assert_eq!(render(&node), Err(RenderError::InvalidHeading { level: 0 }));
    }

    #[test]
    fn plain_text_is_not_escaped() {
        assert_eq!(
            render_markdown("Ampersands & asterisks stay as-is."),
            "Ampersands & asterisks stay as-is."
        );
    }

    #[test]
    fn strong_and_emphasis() {
        assert_eq!(
            render_markdown("**bold** and *italic*"),
            "*bold* and {_}italic{_}"
        );
    }

    #[test]
    fn strikethrough() {
        assert_eq!(render_markdown("~~gone~~"), "-gone-");
    }

    #[test]
    fn code_span() {
        assert_eq!(
            render_markdown("run `cargo build` now"),
            "run {{cargo build}} now"
        );
    }

    #[test]
    fn code_block_body_is_verbatim() {
        let node = Node::CodeBlock("let x = 1;".to_owned());
        assert_eq!(
            render(&node).unwrap(),
            "\n{code:theme=FadeToGrey|linenumbers=true}\nlet x = 1;{code}\n"
        );
    }

    #[test]
    fn fenced_code_block() {
        assert_eq!(
            render_markdown("```\nlet x = 1;\n```"),
            "{code:theme=FadeToGrey|linenumbers=true}\nlet x = 1;\n{code}"
        );
    }

    #[test]
    fn block_quote() {
        assert_eq!(render_markdown("> Note"), "bq. \nNote");
    }

    #[test]
    fn link_renders_title_and_url() {
        assert_eq!(
            render_markdown(r#"[Example](https://example.com "Example site")"#),
            "[Example site|https://example.com]"
        );
    }

    #[test]
    fn link_without_title_renders_empty_title() {
        assert_eq!(
            render_markdown("[Example](https://example.com)"),
            "[|https://example.com]"
        );
    }

    #[test]
    fn autolink() {
        assert_eq!(
            render_markdown("<https://example.com>"),
            "[https://example.com]"
        );
    }

    #[test]
    fn email_autolink() {
        assert_eq!(
            render_markdown("<user@example.com>"),
            "[mailto:user@example.com]"
        );
    }

    #[test]
    fn image() {
        assert_eq!(
            render_markdown(r#"![Logo](logo.png "The logo")"#),
            "!logo.png|align=center|title=The logo|alt=Logo!"
        );
    }

    #[test]
    fn hard_break() {
        assert_eq!(render_markdown("one  \ntwo"), "one\n\\two");
    }

    #[test]
    fn soft_break_stays_a_newline() {
        assert_eq!(render_markdown("one\ntwo"), "one\ntwo");
    }

    #[test]
    fn horizontal_rule() {
        assert_eq!(render_markdown("---"), "----");
    }

    #[test]
    fn single_level_unordered_list() {
        assert_eq!(render_markdown("* a\n* b"), "* a\n* b");
    }

    #[test]
    fn single_level_ordered_list() {
        assert_eq!(render_markdown("1. a\n2. b"), "# a\n# b");
    }

    #[test]
    fn nested_list_markers_repeat_with_depth() {
        assert_eq!(
            render_markdown("- A\n  - B\n  - C\n- D"),
            "* A\n** B\n** C\n* D"
        );
    }

    #[test]
    fn deeply_nested_list() {
        assert_eq!(render_markdown("- A\n  - B\n    - C"), "* A\n** B\n*** C");
    }

    #[test]
    fn ordered_list_nested_in_unordered() {
        assert_eq!(render_markdown("- A\n  1. B\n  2. C"), "* A\n*# B\n*# C");
    }

    #[test]
    fn loose_list_items_are_normalized() {
        assert_eq!(render_markdown("- a\n\n- b"), "* a\n* b");
    }

    #[test]
    fn table_is_rejected() {
        let err = convert("| A | B |\n|---|---|\n| 1 | 2 |").unwrap_err();
        assert_eq!(
            err,
            RenderError::UnsupportedConstruct {
                kind: UnsupportedKind::Table
            }
        );
    }

    #[test]
    fn block_html_is_rejected() {
        let err = convert("<div>\nhi\n</div>").unwrap_err();
        assert_eq!(
            err,
            RenderError::UnsupportedConstruct {
                kind: UnsupportedKind::BlockHtml
            }
        );
    }

    #[test]
    fn inline_html_is_rejected() {
        let err = convert("some <b>bold</b> text").unwrap_err();
        assert_eq!(
            err,
            RenderError::UnsupportedConstruct {
                kind: UnsupportedKind::InlineHtml
            }
        );
    }

    #[test]
    fn table_row_and_cell_nodes_are_rejected() {
        assert_eq!(
            render(&Node::TableRow(vec![])),
            Err(RenderError::UnsupportedConstruct {
                kind: UnsupportedKind::TableRow
            })
        );
        assert_eq!(
            render(&Node::TableCell(vec![])),
            Err(RenderError::UnsupportedConstruct {
                kind: UnsupportedKind::TableCell
            })
        );
    }

    #[test]
    fn footnotes_render_to_nothing() {
        assert_eq!(render_markdown("text[^1]\n\n[^1]: note"), "text");
    }

    #[test]
    fn footnote_section_node_renders_to_nothing() {
        let node = Node::Footnotes(vec![Node::FootnoteItem {
            label: "1".to_owned(),
            children: vec![Node::Text("note".to_owned())],
        }]);
        assert_eq!(render(&node).unwrap(), "");
    }

    #[test]
    fn title_and_paragraph() {
        assert_eq!(
            render_markdown("# Title\n\nHello **world**"),
            "h1. Title\n\nHello *world*"
        );
    }

    #[test]
    fn render_keeps_outer_blank_lines() {
        let document = parse_document("# Title");
        assert_eq!(render(&document).unwrap(), "\nh1. Title\n");
    }

    #[test]
    fn list_state_resets_between_renders() {
        let document = parse_document("- a");
        assert_eq!(render(&document).unwrap(), "\n* a\n");
        assert_eq!(render(&document).unwrap(), "\n* a\n");
    }
}
