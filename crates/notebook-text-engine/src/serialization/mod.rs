//! [`NotebookContent`] to text conversion.
//!
//! Only the current dialect is written:
//!
//! ```text
//! ---
//! <front matter>
//! ---
//! # %% [markdown]
//! <body>
//!
//! # %%--- [javascript]
//! # properties:
//! #   run_on_load: true
//! # ---%%
//! <body>
//! ```
//!
//! A cell is its header, a newline and its text. Cells are joined with a
//! single newline, so a body's trailing empty line is the blank line before
//! the next header.

use serde_yaml::{Mapping, Value};
use thiserror::Error;

use crate::{
    models::{Cell, CellMetadata, NotebookContent},
    parsing::{classify::FENCE, delimiter::CommentPrefix, metadata},
};

#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("failed to encode metadata as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

const PREFIX: CommentPrefix = CommentPrefix::Hash;
const MARKER: &str = "%%";
const METADATA_OPEN: &str = "---";
const METADATA_CLOSE: &str = "---%%";

/// Renders a whole notebook. Empty metadata writes no front matter, and an
/// empty notebook renders as the empty string.
pub fn notebook_content_to_text(content: &NotebookContent) -> Result<String, SerializeError> {
    let mut out = String::new();

    if !content.metadata.is_empty() {
        out.push_str(FENCE);
        out.push('\n');
        out.push_str(&metadata::encode(&content.metadata)?);
        out.push_str(FENCE);
        out.push('\n');
    }

    let cells = content
        .cells
        .iter()
        .map(cell_to_text)
        .collect::<Result<Vec<_>, _>>()?;
    out.push_str(&cells.join("\n"));

    Ok(out)
}

/// Renders one cell: the compact `# %% [type]` header when it has no
/// metadata, the expanded YAML header otherwise.
pub fn cell_to_text(cell: &Cell) -> Result<String, SerializeError> {
    let prefix = PREFIX.as_str();
    let mut out = String::new();

    if cell.metadata.is_empty() {
        out.push_str(&format!("{prefix} {MARKER} [{}]\n", cell.cell_type));
    } else {
        out.push_str(&format!(
            "{prefix} {MARKER}{METADATA_OPEN} [{}]\n",
            cell.cell_type
        ));
        for line in metadata::encode(&metadata_block(&cell.metadata))?.lines() {
            if line.is_empty() {
                out.push_str(prefix);
            } else {
                out.push_str(&format!("{prefix} {line}"));
            }
            out.push('\n');
        }
        out.push_str(&format!("{prefix} {METADATA_CLOSE}\n"));
    }

    out.push_str(&cell.text_content);
    Ok(out)
}

/// The mapping written inside a metadata block. An empty `properties` key is
/// left out so a block holding only other keys reads back unchanged.
fn metadata_block(metadata: &CellMetadata) -> Mapping {
    let mut block = Mapping::new();
    if !metadata.properties.is_empty() {
        block.insert(
            Value::from("properties"),
            Value::Mapping(metadata.properties.clone()),
        );
    }
    for (key, value) in &metadata.extra {
        block.insert(key.clone(), value.clone());
    }
    block
}
