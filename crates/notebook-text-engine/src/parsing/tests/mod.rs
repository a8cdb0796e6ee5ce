//! Integration tests for the parsing module.
//!
//! Fixtures (.nb) and snapshots (.snap) are co-located in `fixtures/`.


use pretty_assertions::assert_eq;
use serde_yaml::Value;

use crate::{
    parsing::{DiagnosticKind, ParseError, parse_with_diagnostics, text_to_notebook_content},
    serialization::notebook_content_to_text,
};

// Fixture-based snapshot tests

#[test]
fn fixture_simple_notebook() {
    assert_fixture("simple_notebook");
}

#[test]
fn fixture_front_matter() {
    assert_fixture("front_matter");
}

#[test]
fn fixture_legacy_dialect() {
    assert_fixture("legacy_dialect");
}

#[test]
fn fixture_unterminated_metadata() {
    assert_fixture("unterminated_metadata");
}

#[test]
fn fixture_stray_preamble() {
    assert_fixture("stray_preamble");
}

#[test]
fn fixture_comment_styles() {
    assert_fixture("comment_styles");
}

fn assert_fixture(name: &str) {
    let fixtures_dir = format!("{}/src/parsing/tests/fixtures", env!("CARGO_MANIFEST_DIR"));
    let text = std::fs::read_to_string(format!("{fixtures_dir}/{name}.nb")).unwrap();

    let parsed = parse_with_diagnostics(&text).unwrap();
    invariants::check(&text, &parsed);

    let snap = normalize::normalize(&parsed);
    insta::with_settings!({
        snapshot_path => fixtures_dir.as_str(),
        prepend_module_to_snapshot => false,
    }, {
        insta::assert_snapshot!(name, snap);
    });
}

// Scenario tests

const SIMPLE_NOTEBOOK: &str = "# %% [markdown]
# Notebook
Hello there!

# %%--- [js]
# properties:
#   run_on_load: true
# ---%%
const x = 5;
x;

# %% [unknown-cell-type]
";

#[test]
fn simple_notebook_has_three_cells() {
    let content = text_to_notebook_content(SIMPLE_NOTEBOOK).unwrap();

    assert_eq!(content.cells.len(), 3);
    assert_eq!(content.cells[0].cell_type, "markdown");
    assert_eq!(content.cells[0].line_count(), 3);
    assert_eq!(
        content.cells[1].metadata.property("run_on_load"),
        Some(&Value::Bool(true))
    );
    assert_eq!(content.cells[2].cell_type, "unknown-cell-type");
}

#[test]
fn canonical_text_round_trips_exactly() {
    let content = text_to_notebook_content(SIMPLE_NOTEBOOK).unwrap();

    assert_eq!(notebook_content_to_text(&content).unwrap(), SIMPLE_NOTEBOOK);
}

#[test]
fn stray_percent_line_stays_in_body() {
    let content = text_to_notebook_content("# %% [javascript]\nlet a = 1;\n%%\nlet b = 2;").unwrap();

    assert_eq!(content.cells.len(), 1);
    assert_eq!(content.cells[0].text_content, "let a = 1;\n%%\nlet b = 2;");
}

#[test]
fn chaos_is_fatal() {
    assert!(matches!(
        text_to_notebook_content("There are no cells, just chaos!"),
        Err(ParseError::NoStructure)
    ));
}

#[test]
fn empty_document() {
    let content = text_to_notebook_content("").unwrap();

    assert!(content.metadata.is_empty());
    assert!(content.cells.is_empty());
    assert_eq!(notebook_content_to_text(&content).unwrap(), "");
}

#[test]
fn front_matter_only_document() {
    let content = text_to_notebook_content("---\ntitle: Demo\n---\n").unwrap();

    assert_eq!(content.metadata.len(), 1);
    assert!(content.cells.is_empty());
}

#[test]
fn unterminated_front_matter_alone_is_fatal() {
    assert!(matches!(
        text_to_notebook_content("---\ntitle: Demo\n"),
        Err(ParseError::NoStructure)
    ));
}

#[test]
fn front_matter_must_be_a_mapping() {
    let err = text_to_notebook_content("---\njust words\n---\n# %% [markdown]\n").unwrap_err();

    assert!(matches!(err, ParseError::FrontMatter { line: 1, .. }));
    assert_eq!(err.to_string(), "invalid front matter at line 1");
}

#[test]
fn crlf_input_parses_like_lf() {
    let lf = text_to_notebook_content(SIMPLE_NOTEBOOK).unwrap();
    let crlf = text_to_notebook_content(&SIMPLE_NOTEBOOK.replace('\n', "\r\n")).unwrap();

    assert!(lf.same_content(&crlf));
}

#[test]
fn two_parses_differ_only_in_ids() {
    let a = text_to_notebook_content(SIMPLE_NOTEBOOK).unwrap();
    let b = text_to_notebook_content(SIMPLE_NOTEBOOK).unwrap();

    assert!(a.same_content(&b));
    assert_ne!(a.cells[0].id, b.cells[0].id);
}

#[test]
fn slashes_metadata_block() {
    let text = "// %%--- [javascript]\n// properties:\n//   autoRun: true\n// ---%%\nrun();";
    let content = text_to_notebook_content(text).unwrap();

    assert!(content.cells[0].metadata.has_flag("autoRun"));
    assert_eq!(content.cells[0].text_content, "run();");
}

#[test]
fn unbracketed_title_is_ignored_with_metadata_block() {
    let text = "# %%--- Setup javascript\n# owner: alice\n# ---%%\nrun();";
    let content = text_to_notebook_content(text).unwrap();
    let cell = &content.cells[0];

    assert_eq!(cell.cell_type, "javascript");
    assert!(cell.metadata.properties.is_empty());
    assert_eq!(
        cell.metadata.extra.get("owner"),
        Some(&Value::String("alice".into()))
    );
}

#[test]
fn unbracketed_title_does_not_become_properties() {
    let content = text_to_notebook_content("# %% My analysis python\nprint(1)").unwrap();
    let cell = &content.cells[0];

    assert_eq!(cell.cell_type, "python");
    assert!(cell.metadata.is_empty());
    assert_eq!(
        notebook_content_to_text(&content).unwrap(),
        "# %% [python]\nprint(1)"
    );
}

#[test]
fn text_before_first_delimiter_is_not_a_cell() {
    let parsed = parse_with_diagnostics("Some notes\n# %% [markdown]\nBody").unwrap();

    assert_eq!(parsed.content.cells.len(), 1);
    assert_eq!(parsed.content.cells[0].cell_type, "markdown");
    assert_eq!(parsed.content.cells[0].text_content, "Body");
    assert_eq!(parsed.preamble.as_deref(), Some("Some notes"));
    assert_eq!(parsed.diagnostics[0].kind, DiagnosticKind::StrayPreamble);
}

#[test]
fn leading_indented_delimiter_is_not_a_cell() {
    let parsed = parse_with_diagnostics(" # %% [javascript]\n# %% [markdown]\nx").unwrap();

    let types: Vec<_> = parsed.content.cells.iter().map(|c| c.cell_type.as_str()).collect();
    assert_eq!(types, ["markdown"]);
    assert_eq!(parsed.preamble.as_deref(), Some(" # %% [javascript]"));
}

#[test]
fn indented_delimiter_folds_into_body() {
    let content = text_to_notebook_content("# %% [js]\n  # %% [css]\nx").unwrap();

    assert_eq!(content.cells.len(), 1);
    assert_eq!(content.cells[0].cell_type, "js");
    assert_eq!(content.cells[0].text_content, "  # %% [css]\nx");
}

#[test]
fn invalid_cell_metadata_keeps_body() {
    let parsed = parse_with_diagnostics("# %%--- [js]\n# - a\n# - b\n# ---%%\nx;").unwrap();

    let cell = &parsed.content.cells[0];
    assert!(cell.metadata.is_empty());
    assert_eq!(cell.text_content, "x;");
    assert_eq!(parsed.diagnostics.len(), 1);
}
