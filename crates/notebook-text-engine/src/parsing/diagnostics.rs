use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// A recoverable problem found while parsing. The document still loads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// `---` opened front matter that was never closed; its lines were kept
    /// as undecoded preamble text.
    UnterminatedFrontMatter,
    /// A cell metadata block ran into the next cell or end of input; its lines
    /// were kept as the cell body.
    UnterminatedCellMetadata,
    /// A cell metadata block could not be decoded; the cell got empty metadata.
    InvalidCellMetadata { reason: String },
    /// Text before the first cell delimiter that is not front matter. It is
    /// kept in [`ParsedNotebook::preamble`](super::ParsedNotebook) and belongs
    /// to no cell.
    StrayPreamble,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based line number.
    pub line: usize,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        match self.kind {
            DiagnosticKind::InvalidCellMetadata { .. } => Severity::Error,
            DiagnosticKind::UnterminatedFrontMatter
            | DiagnosticKind::UnterminatedCellMetadata
            | DiagnosticKind::StrayPreamble => Severity::Warning,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: ", self.line)?;
        match &self.kind {
            DiagnosticKind::UnterminatedFrontMatter => {
                f.write_str("front matter is never closed, keeping it as preamble text")
            }
            DiagnosticKind::UnterminatedCellMetadata => {
                f.write_str("cell metadata block is never closed, keeping it as cell text")
            }
            DiagnosticKind::InvalidCellMetadata { reason } => {
                write!(f, "invalid cell metadata ({reason}), using empty metadata")
            }
            DiagnosticKind::StrayPreamble => {
                f.write_str("text before the first cell is not part of any cell")
            }
        }
    }
}

/// Logs `kind` at its severity and records it.
pub(crate) fn report(diagnostics: &mut Vec<Diagnostic>, line: usize, kind: DiagnosticKind) {
    let diagnostic = Diagnostic { line, kind };
    match diagnostic.severity() {
        Severity::Warning => log::warn!("{diagnostic}"),
        Severity::Error => log::error!("{diagnostic}"),
    }
    diagnostics.push(diagnostic);
}
