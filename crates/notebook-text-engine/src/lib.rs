pub mod editing;
pub mod io;
pub mod models;
pub mod parsing;
pub mod serialization;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use editing::{BuiltinCellTypes, CellTypeRegistry, Cmd, EditError, InsertPosition, Patch};
pub use io::*;
pub use models::{Cell, CellId, CellMetadata, NotebookContent, NotebookMetadata};
pub use parsing::{
    CellDelimiter, Diagnostic, DiagnosticKind, ParseError, ParsedNotebook, Severity, parse_with_diagnostics,
    text_to_notebook_content,
};
pub use serialization::{SerializeError, cell_to_text, notebook_content_to_text};
