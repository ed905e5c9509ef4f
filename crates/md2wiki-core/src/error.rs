//! Error types for wiki markup rendering.

use std::fmt;

/// Construct kinds with no Confluence wiki markup equivalent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnsupportedKind {
    /// Raw HTML block.
    BlockHtml,
    /// Raw inline HTML span.
    InlineHtml,
    /// Table.
    Table,
    /// Table row.
    TableRow,
    /// Table cell.
    TableCell,
}

impl UnsupportedKind {
    /// Human-readable name of the construct.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BlockHtml => "block HTML",
            Self::InlineHtml => "inline HTML",
            Self::Table => "table",
            Self::TableRow => "table row",
            Self::TableCell => "table cell",
        }
    }
}

impl fmt::Display for UnsupportedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error from rendering a document to wiki markup.
///
/// Both variants are fatal: the render unwinds without producing partial
/// output.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// Construct that has no wiki markup mapping; the render is aborted
    /// rather than emitting lossy output.
    #[error("cannot render {kind} as Confluence wiki markup")]
    UnsupportedConstruct { kind: UnsupportedKind },

    /// Heading level below 1. A well-formed parser never produces this.
    #[error("invalid heading level: {level}")]
    InvalidHeading { level: u8 },
}
