//! Confluence wiki markup formatting primitives.
//!
//! Each function maps one rendered fragment to its markup form. The
//! surrounding whitespace is part of each template: block formatters
//! carry their own newlines, inline formatters emit bare spans.

use crate::error::RenderError;

/// Horizontal rule marker.
pub(crate) const HORIZONTAL_RULE: &str = "----";

/// Forced line break: newline plus a single backslash.
pub(crate) const LINE_BREAK: &str = "\n\\";

/// Format a heading. Levels above 6 are clamped to 6; level 0 is a
/// contract violation in the document model.
pub(crate) fn heading(level: u8, inner: &str) -> Result<String, RenderError> {
    if level < 1 {
        return Err(RenderError::InvalidHeading { level });
    }
    let level = level.min(6);
    Ok(format!("\nh{level}. {inner}\n"))
}

pub(crate) fn paragraph(inner: &str) -> String {
    format!("\n{inner}\n")
}

pub(crate) fn block_quote(inner: &str) -> String {
    format!("bq. {inner}")
}

/// The `{code}` macro body is passed through verbatim, never escaped.
pub(crate) fn code_block(code: &str) -> String {
    format!("\n{{code:theme=FadeToGrey|linenumbers=true}}\n{code}{{code}}\n")
}

pub(crate) fn code_span(text: &str) -> String {
    format!("{{{{{text}}}}}")
}

pub(crate) fn strong(inner: &str) -> String {
    format!("*{inner}*")
}

pub(crate) fn emphasis(inner: &str) -> String {
    format!("{{_}}{inner}{{_}}")
}

pub(crate) fn strikethrough(inner: &str) -> String {
    format!("-{inner}-")
}

/// Links carry the title, not the link text: `[title|url]`.
pub(crate) fn link(url: &str, title: &str) -> String {
    format!("[{title}|{url}]")
}

pub(crate) fn image(src: &str, title: &str, alt: &str) -> String {
    format!("\n!{src}|align=center|title={title}|alt={alt}!")
}

pub(crate) fn autolink(url: &str, email: bool) -> String {
    if email {
        format!("[mailto:{url}]")
    } else {
        format!("[{url}]\n")
    }
}

/// Wrap an assembled list body in its leading newline. The body arrives
/// fully prefixed; markers are applied per item by [`list_item`].
pub(crate) fn list(body: &str) -> String {
    format!("\n{body}")
}

/// Prefix one list item with its nesting marker, e.g. `**` for an
/// unordered item at depth 2. Nested list fragments inside the item keep
/// their own prefixes; only the surrounding newlines are normalized.
pub(crate) fn list_item(inner: &str, marker: &str) -> String {
    format!("{marker} {}\n", inner.trim_matches('\n'))
}
