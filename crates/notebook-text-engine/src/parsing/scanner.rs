use serde_yaml::Mapping;

use super::{
    classify::{LineClass, LineKind},
    delimiter::{CellDelimiter, Delimiter},
    diagnostics::{Diagnostic, DiagnosticKind, report},
    error::ParseError,
    lines::LineRef,
    metadata,
};

/// A cell as scanned, before it becomes a [`Cell`](crate::models::Cell).
#[derive(Debug, Clone, PartialEq)]
pub struct RawCell<'a> {
    /// Zero-based line number of the delimiter.
    pub header_line: usize,
    pub cell_type: String,
    /// Bare flags from the header line (`%% js autoRun`).
    pub flags: Vec<String>,
    /// Decoded metadata block, if the cell had one that decoded.
    pub metadata: Option<Mapping>,
    pub body: Vec<&'a str>,
}

/// Output of the scanning phase.
#[derive(Debug)]
pub struct ScannedDocument<'a> {
    pub front_matter: Option<Mapping>,
    /// Text before the first cell that is not front matter, including an
    /// unterminated front matter block. Empty when it was blank.
    pub preamble: Vec<LineRef<'a>>,
    pub cells: Vec<RawCell<'a>>,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug)]
enum ScanState<'a> {
    BeforeFirstCell,
    FrontMatter {
        start: LineRef<'a>,
        lines: Vec<LineRef<'a>>,
    },
    CellBody,
    CellMetadata {
        start: usize,
        yaml: Vec<&'a str>,
        raw: Vec<&'a str>,
    },
}

/// Phase 2 of parsing: walks classified lines and groups them into front
/// matter, preamble and raw cells.
pub struct DocumentScanner<'a> {
    state: ScanState<'a>,
    front_matter: Option<Mapping>,
    preamble: Vec<LineRef<'a>>,
    cells: Vec<RawCell<'a>>,
    diagnostics: Vec<Diagnostic>,
    lines_seen: usize,
}

impl<'a> DocumentScanner<'a> {
    pub fn new() -> Self {
        Self {
            state: ScanState::BeforeFirstCell,
            front_matter: None,
            preamble: vec![],
            cells: vec![],
            diagnostics: vec![],
            lines_seen: 0,
        }
    }

    /// Feeds the next line. Fails only when front matter is closed but does
    /// not decode to a mapping.
    pub fn push(&mut self, c: LineClass<'a>) -> Result<(), ParseError> {
        self.lines_seen += 1;
        let state = std::mem::replace(&mut self.state, ScanState::CellBody);
        self.state = match state {
            ScanState::BeforeFirstCell => self.before_first_cell(c),
            ScanState::FrontMatter { start, lines } => self.front_matter_line(start, lines, c)?,
            ScanState::CellBody => self.body_line(c),
            ScanState::CellMetadata { start, yaml, raw } => self.metadata_line(start, yaml, raw, c),
        };
        Ok(())
    }

    pub fn finish(mut self) -> Result<ScannedDocument<'a>, ParseError> {
        // EOF flush
        match std::mem::replace(&mut self.state, ScanState::CellBody) {
            ScanState::FrontMatter { start, lines } => self.abandon_front_matter(start, lines),
            ScanState::CellMetadata { start, raw, .. } => self.abandon_metadata(start, raw),
            ScanState::BeforeFirstCell | ScanState::CellBody => {}
        }

        if self.cells.is_empty() {
            if self.front_matter.is_none() && has_text(&self.preamble) {
                return Err(ParseError::NoStructure);
            }
            self.settle_preamble();
        }

        log::debug!(
            "scanned {} lines into {} cells",
            self.lines_seen,
            self.cells.len()
        );

        Ok(ScannedDocument {
            front_matter: self.front_matter,
            preamble: self.preamble,
            cells: self.cells,
            diagnostics: self.diagnostics,
        })
    }

    fn before_first_cell(&mut self, c: LineClass<'a>) -> ScanState<'a> {
        match c.kind {
            LineKind::Delimiter(delimiter) => self.open_cell(c.line, delimiter),
            LineKind::Fence if self.front_matter_allowed() => {
                self.preamble.clear();
                ScanState::FrontMatter {
                    start: c.line,
                    lines: vec![],
                }
            }
            _ => {
                self.preamble.push(c.line);
                ScanState::BeforeFirstCell
            }
        }
    }

    /// Front matter must be the first non-blank thing in the document.
    fn front_matter_allowed(&self) -> bool {
        self.front_matter.is_none() && !has_text(&self.preamble)
    }

    fn front_matter_line(
        &mut self,
        start: LineRef<'a>,
        mut lines: Vec<LineRef<'a>>,
        c: LineClass<'a>,
    ) -> Result<ScanState<'a>, ParseError> {
        match c.kind {
            LineKind::Fence => {
                let yaml = join_text(&lines);
                let mapping = metadata::decode_mapping(&yaml).map_err(|source| {
                    ParseError::FrontMatter {
                        line: start.number + 1,
                        source,
                    }
                })?;
                self.front_matter = Some(mapping);
                Ok(ScanState::BeforeFirstCell)
            }
            LineKind::Delimiter(delimiter) => {
                self.abandon_front_matter(start, lines);
                Ok(self.open_cell(c.line, delimiter))
            }
            _ => {
                lines.push(c.line);
                Ok(ScanState::FrontMatter { start, lines })
            }
        }
    }

    fn body_line(&mut self, c: LineClass<'a>) -> ScanState<'a> {
        match c.kind {
            LineKind::Delimiter(delimiter) => self.open_cell(c.line, delimiter),
            _ => {
                self.append_body(c.line.text);
                ScanState::CellBody
            }
        }
    }

    fn metadata_line(
        &mut self,
        start: usize,
        mut yaml: Vec<&'a str>,
        mut raw: Vec<&'a str>,
        c: LineClass<'a>,
    ) -> ScanState<'a> {
        match c.kind {
            LineKind::MetadataClose => {
                self.close_metadata(start, &yaml);
                ScanState::CellBody
            }
            LineKind::Delimiter(delimiter) => {
                self.abandon_metadata(start, raw);
                self.open_cell(c.line, delimiter)
            }
            _ => {
                yaml.push(CellDelimiter::strip_comment(c.line.text));
                raw.push(c.line.text);
                ScanState::CellMetadata { start, yaml, raw }
            }
        }
    }

    fn open_cell(&mut self, line: LineRef<'a>, delimiter: Delimiter) -> ScanState<'a> {
        if self.cells.is_empty() {
            self.settle_preamble();
        }

        let opens_metadata = delimiter.opens_metadata;
        self.cells.push(RawCell {
            header_line: line.number,
            cell_type: delimiter.cell_type,
            flags: delimiter.flags,
            metadata: None,
            body: vec![],
        });

        if opens_metadata {
            ScanState::CellMetadata {
                start: line.number,
                yaml: vec![],
                raw: vec![],
            }
        } else {
            ScanState::CellBody
        }
    }

    fn append_body(&mut self, text: &'a str) {
        if let Some(cell) = self.cells.last_mut() {
            cell.body.push(text);
        }
    }

    fn close_metadata(&mut self, start: usize, yaml: &[&str]) {
        match metadata::decode_mapping(&yaml.join("\n")) {
            Ok(mapping) => {
                if let Some(cell) = self.cells.last_mut() {
                    cell.metadata = Some(mapping);
                }
            }
            Err(e) => report(
                &mut self.diagnostics,
                start + 1,
                DiagnosticKind::InvalidCellMetadata {
                    reason: e.to_string(),
                },
            ),
        }
    }

    fn abandon_metadata(&mut self, start: usize, raw: Vec<&'a str>) {
        report(
            &mut self.diagnostics,
            start + 1,
            DiagnosticKind::UnterminatedCellMetadata,
        );
        if let Some(cell) = self.cells.last_mut() {
            cell.body.extend(raw);
        }
    }

    fn abandon_front_matter(&mut self, start: LineRef<'a>, lines: Vec<LineRef<'a>>) {
        report(
            &mut self.diagnostics,
            start.number + 1,
            DiagnosticKind::UnterminatedFrontMatter,
        );
        self.preamble.push(start);
        self.preamble.extend(lines);
    }

    /// Keeps the preamble (with a warning) if it has text, drops it otherwise.
    /// It never becomes a cell.
    fn settle_preamble(&mut self) {
        match self.preamble.iter().find(|l| !is_blank(l.text)) {
            Some(first) => {
                let line = first.number + 1;
                report(&mut self.diagnostics, line, DiagnosticKind::StrayPreamble);
            }
            None => self.preamble.clear(),
        }
    }
}

impl Default for DocumentScanner<'_> {
    fn default() -> Self {
        Self::new()
    }
}

fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

fn has_text(lines: &[LineRef<'_>]) -> bool {
    lines.iter().any(|l| !is_blank(l.text))
}

fn join_text(lines: &[LineRef<'_>]) -> String {
    lines.iter().map(|l| l.text).collect::<Vec<_>>().join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::{classify::NotebookLineClassifier, lines::split_lines};

    fn scan(text: &str) -> Result<ScannedDocument<'_>, ParseError> {
        let mut scanner = DocumentScanner::new();
        for line in split_lines(text) {
            scanner.push(NotebookLineClassifier.classify(line))?;
        }
        scanner.finish()
    }

    #[test]
    fn body_lines_follow_their_delimiter() {
        let doc = scan("# %% [markdown]\n# Title\n\n# %% [css]\nbody {}").unwrap();

        assert_eq!(doc.cells.len(), 2);
        assert_eq!(doc.cells[0].body, ["# Title", ""]);
        assert_eq!(doc.cells[1].header_line, 3);
        assert_eq!(doc.cells[1].body, ["body {}"]);
    }

    #[test]
    fn front_matter_is_decoded() {
        let doc = scan("\n---\ntitle: Demo\n---\n# %% [markdown]\n").unwrap();

        let front_matter = doc.front_matter.unwrap();
        assert_eq!(front_matter.get("title").and_then(|v| v.as_str()), Some("Demo"));
        assert!(doc.preamble.is_empty());
        assert!(doc.diagnostics.is_empty());
    }

    #[test]
    fn fence_after_text_is_not_front_matter() {
        let doc = scan("hello\n---\n# %% [markdown]").unwrap();

        assert!(doc.front_matter.is_none());
        assert_eq!(doc.preamble.len(), 2);
        assert_eq!(doc.diagnostics[0].kind, DiagnosticKind::StrayPreamble);
    }

    #[test]
    fn delimiter_ends_unterminated_front_matter() {
        let doc = scan("---\ntitle: Demo\n# %% [markdown]\nx").unwrap();

        assert!(doc.front_matter.is_none());
        let preamble: Vec<_> = doc.preamble.iter().map(|l| l.text).collect();
        assert_eq!(preamble, ["---", "title: Demo"]);
        let kinds: Vec<_> = doc.diagnostics.iter().map(|d| d.kind.clone()).collect();
        assert_eq!(
            kinds,
            [
                DiagnosticKind::UnterminatedFrontMatter,
                DiagnosticKind::StrayPreamble
            ]
        );
    }

    #[test]
    fn indented_delimiter_stays_in_body() {
        let doc = scan("# %% [js]\n  # %% [css]\nx").unwrap();

        assert_eq!(doc.cells.len(), 1);
        assert_eq!(doc.cells[0].body, ["  # %% [css]", "x"]);
        assert!(doc.diagnostics.is_empty());
    }

    #[test]
    fn leading_indented_delimiter_is_preamble() {
        let doc = scan(" # %% [javascript]\n# %% [markdown]\nx").unwrap();

        assert_eq!(doc.cells.len(), 1);
        assert_eq!(doc.cells[0].cell_type, "markdown");
        let preamble: Vec<_> = doc.preamble.iter().map(|l| l.text).collect();
        assert_eq!(preamble, [" # %% [javascript]"]);
        assert_eq!(doc.diagnostics[0].kind, DiagnosticKind::StrayPreamble);
    }

    #[test]
    fn indented_delimiter_alone_has_no_structure() {
        assert!(matches!(
            scan("  # %% [markdown]\nx"),
            Err(ParseError::NoStructure)
        ));
    }

    #[test]
    fn metadata_block_is_stripped_and_decoded() {
        let doc = scan("# %%--- [js]\n# properties:\n#   run_on_load: true\n# ---%%\nx;").unwrap();

        let cell = &doc.cells[0];
        let metadata = cell.metadata.as_ref().unwrap();
        assert!(metadata.contains_key("properties"));
        assert_eq!(cell.body, ["x;"]);
    }

    #[test]
    fn unterminated_metadata_block_becomes_body() {
        let doc = scan("# %%--- [js]\n# properties:\n# %% [css]\na {}").unwrap();

        assert_eq!(doc.cells.len(), 2);
        assert_eq!(doc.cells[0].body, ["# properties:"]);
        assert_eq!(doc.cells[0].metadata, None);
        assert_eq!(doc.diagnostics[0].line, 1);
        assert_eq!(
            doc.diagnostics[0].kind,
            DiagnosticKind::UnterminatedCellMetadata
        );
    }

    #[test]
    fn invalid_metadata_block_is_reported() {
        let doc = scan("# %%--- [js]\n# just a string\n# ---%%\nx;").unwrap();

        assert_eq!(doc.cells[0].metadata, None);
        assert_eq!(doc.cells[0].body, ["x;"]);
        assert!(matches!(
            doc.diagnostics[0].kind,
            DiagnosticKind::InvalidCellMetadata { .. }
        ));
    }

    #[test]
    fn text_without_structure_is_fatal() {
        assert!(matches!(
            scan("There are no cells, just chaos!"),
            Err(ParseError::NoStructure)
        ));
    }

    #[test]
    fn blank_document_is_empty() {
        let doc = scan("\n  \n").unwrap();

        assert!(doc.cells.is_empty());
        assert!(doc.preamble.is_empty());
        assert!(doc.diagnostics.is_empty());
    }

    #[test]
    fn non_mapping_front_matter_is_fatal() {
        match scan("---\n- a\n- b\n---\n# %% [markdown]") {
            Err(ParseError::FrontMatter { line, .. }) => assert_eq!(line, 1),
            other => panic!("expected front matter error, got {other:?}"),
        }
    }
}
