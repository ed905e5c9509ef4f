//! Markdown to Confluence wiki markup converter using pulldown-cmark.
//!
//! Markdown source is parsed into a [`Node`] tree and rendered bottom-up
//! to Confluence wiki markup (the plain-text dialect, not the XHTML
//! storage format). Constructs without a wiki markup equivalent — raw
//! HTML and tables — abort the render with a typed error instead of
//! degrading silently; footnotes are dropped.
//!
//! # Example
//!
//! ```
//! let markup = md2wiki_core::convert("# Title\n\nHello **world**").unwrap();
//! assert_eq!(markup, "h1. Title\n\nHello *world*");
//! ```

mod error;
mod markup;
mod node;
mod renderer;
mod tree;

pub use error::{RenderError, UnsupportedKind};
pub use node::Node;
pub use renderer::render;
pub use tree::parse_document;

/// Convert Markdown source to Confluence wiki markup.
///
/// Parses, renders, and trims the blank lines the block templates leave
/// at both ends of the output.
///
/// # Errors
///
/// Returns [`RenderError`] if the document contains a construct with no
/// wiki markup equivalent.
pub fn convert(markdown: &str) -> Result<String, RenderError> {
    let document = tree::parse_document(markdown);
    let rendered = renderer::render(&document)?;
    Ok(trim_blank_lines(&rendered).to_owned())
}

/// Strip leading and trailing blank-line runs from rendered markup.
#[must_use]
pub fn trim_blank_lines(markup: &str) -> &str {
    markup.trim_matches('\n')
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn trim_blank_lines_strips_both_ends() {
        assert_eq!(trim_blank_lines("\n\nh1. Title\n"), "h1. Title");
        assert_eq!(trim_blank_lines("no blanks"), "no blanks");
        assert_eq!(trim_blank_lines(""), "");
    }

    #[test]
    fn convert_trims_outer_blank_lines() {
        assert_eq!(convert("# Title").unwrap(), "h1. Title");
    }
}
