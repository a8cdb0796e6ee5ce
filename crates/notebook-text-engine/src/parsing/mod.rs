//! Text to [`NotebookContent`] conversion.
//!
//! Parsing runs in three phases: every line is classified on its own
//! ([`NotebookLineClassifier`]), the [`DocumentScanner`] groups the classified
//! lines into front matter and raw cells, and [`assemble`] builds the model.

pub mod assemble;
pub mod classify;
pub mod delimiter;
pub mod diagnostics;
pub mod error;
pub mod lines;
pub mod metadata;
pub mod scanner;

#[cfg(test)]
mod tests;

use crate::models::NotebookContent;

use assemble::assemble;
use classify::NotebookLineClassifier;
use lines::split_lines;
use scanner::DocumentScanner;

pub use delimiter::{CellDelimiter, Delimiter, Dialect};
pub use diagnostics::{Diagnostic, DiagnosticKind, Severity};
pub use error::ParseError;
pub use metadata::MetadataError;

/// A parsed document together with every recoverable problem found on the way.
#[derive(Debug, Clone)]
pub struct ParsedNotebook {
    pub content: NotebookContent,
    /// Text before the first delimiter that is neither blank nor valid front
    /// matter. It has no place in [`NotebookContent`], so serializing the
    /// content drops it.
    pub preamble: Option<String>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parses notebook text, returning recoverable problems alongside the content.
pub fn parse_with_diagnostics(text: &str) -> Result<ParsedNotebook, ParseError> {
    let classifier = NotebookLineClassifier;
    let mut scanner = DocumentScanner::new();

    for line in split_lines(text) {
        scanner.push(classifier.classify(line))?;
    }

    Ok(assemble(scanner.finish()?))
}

/// Parses notebook text. Recoverable problems are logged and otherwise
/// ignored; see [`parse_with_diagnostics`].
pub fn text_to_notebook_content(text: &str) -> Result<NotebookContent, ParseError> {
    parse_with_diagnostics(text).map(|parsed| parsed.content)
}
