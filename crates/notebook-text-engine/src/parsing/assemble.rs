use crate::models::{Cell, CellMetadata, NotebookContent, NotebookMetadata};

use super::{
    ParsedNotebook,
    diagnostics::{Diagnostic, DiagnosticKind, report},
    scanner::{RawCell, ScannedDocument},
};

/// Phase 3 of parsing: turns scanned records into the data model, giving
/// every cell a fresh id.
pub fn assemble(scanned: ScannedDocument<'_>) -> ParsedNotebook {
    let ScannedDocument {
        front_matter,
        preamble,
        cells,
        mut diagnostics,
    } = scanned;

    let out: Vec<Cell> = cells
        .into_iter()
        .map(|raw| assemble_cell(raw, &mut diagnostics))
        .collect();
    let preamble = (!preamble.is_empty()).then(|| {
        preamble
            .iter()
            .map(|l| l.text)
            .collect::<Vec<_>>()
            .join("\n")
    });

    let metadata = front_matter
        .map(NotebookMetadata::from)
        .unwrap_or_default();

    ParsedNotebook {
        content: NotebookContent::new(metadata, out),
        preamble,
        diagnostics,
    }
}

fn assemble_cell(raw: RawCell<'_>, diagnostics: &mut Vec<Diagnostic>) -> Cell {
    let mut metadata = match raw.metadata {
        Some(mapping) => CellMetadata::from_mapping(mapping).unwrap_or_else(|e| {
            report(
                diagnostics,
                raw.header_line + 1,
                DiagnosticKind::InvalidCellMetadata {
                    reason: e.to_string(),
                },
            );
            CellMetadata::default()
        }),
        None => CellMetadata::default(),
    };
    for flag in &raw.flags {
        metadata.set_flag(flag);
    }

    Cell::new(raw.cell_type, raw.body.join("\n")).with_metadata(metadata)
}
