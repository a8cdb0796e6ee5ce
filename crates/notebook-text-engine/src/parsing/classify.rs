use super::{
    delimiter::{CellDelimiter, Delimiter},
    lines::LineRef,
};

/// The front matter fence.
pub const FENCE: &str = "---";

/// What a single line looks like, decided without any surrounding context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// Opens a new cell.
    Delimiter(Delimiter),
    /// Closes a cell metadata block (`# ---%%`).
    MetadataClose,
    /// A front matter fence (`---`).
    Fence,
    /// Whitespace only.
    Blank,
    Text,
}

/// Classification of a single line containing only local facts.
///
/// This is phase 1 of scanning: the [`DocumentScanner`](super::scanner::DocumentScanner)
/// decides what a line means in context.
#[derive(Debug, Clone)]
pub struct LineClass<'a> {
    pub line: LineRef<'a>,
    pub kind: LineKind,
}

/// Classifies individual lines for the scanning phase.
pub struct NotebookLineClassifier;

impl NotebookLineClassifier {
    /// Delimiters take precedence over everything else, then metadata
    /// closers, then fences.
    pub fn classify<'a>(&self, line: LineRef<'a>) -> LineClass<'a> {
        let kind = if let Some(delimiter) = CellDelimiter::parse(line.text) {
            LineKind::Delimiter(delimiter)
        } else if CellDelimiter::closes_metadata(line.text) {
            LineKind::MetadataClose
        } else if line.text.trim_end() == FENCE {
            LineKind::Fence
        } else if line.text.trim().is_empty() {
            LineKind::Blank
        } else {
            LineKind::Text
        };

        LineClass { line, kind }
    }
}
