use std::fmt;

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

/// Runtime identity of a cell.
///
/// Ids are never written to the text format. Every parse hands out fresh ones,
/// so two parses of the same text agree on everything except ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CellId(String);

impl CellId {
    /// Generates a new random (UUID v4) id.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CellId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CellId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Per-cell metadata as decoded from a cell's YAML block.
///
/// `properties` holds the cell flags (`run_on_load: true`, ...). Any other
/// top-level key lands in `extra` and is written back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CellMetadata {
    #[serde(default)]
    pub properties: Mapping,
    #[serde(flatten)]
    pub extra: Mapping,
}

impl CellMetadata {
    /// Decodes metadata from an already-parsed YAML mapping.
    pub fn from_mapping(mapping: Mapping) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_value(Value::Mapping(mapping))
    }

    /// True when nothing needs to be written: the compact header suffices.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty() && self.extra.is_empty()
    }

    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    /// True if the property is present and set to boolean `true`.
    pub fn has_flag(&self, name: &str) -> bool {
        matches!(self.property(name), Some(Value::Bool(true)))
    }

    pub fn set_property(&mut self, name: &str, value: Value) -> Option<Value> {
        self.properties.insert(Value::String(name.to_string()), value)
    }

    /// Sets `name: true` unless the property already carries a value.
    pub fn set_flag(&mut self, name: &str) {
        if !self.properties.contains_key(name) {
            self.set_property(name, Value::Bool(true));
        }
    }

    /// Removes a property, keeping the order of the remaining ones.
    pub fn remove_property(&mut self, name: &str) -> Option<Value> {
        self.properties.shift_remove(name)
    }
}

/// One unit of a notebook: a typed block of text plus its metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    /// Short type tag such as `markdown` or `javascript`. Empty when the
    /// header carried no type.
    pub cell_type: String,
    /// Cell body, excluding the header line(s) and metadata block.
    pub text_content: String,
    #[serde(default)]
    pub metadata: CellMetadata,
    #[serde(default)]
    pub id: CellId,
}

impl Cell {
    pub fn new(cell_type: impl Into<String>, text_content: impl Into<String>) -> Self {
        Self {
            cell_type: cell_type.into(),
            text_content: text_content.into(),
            metadata: CellMetadata::default(),
            id: CellId::new(),
        }
    }

    pub fn with_metadata(mut self, metadata: CellMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Compares everything except the id.
    pub fn same_content(&self, other: &Cell) -> bool {
        self.cell_type == other.cell_type
            && self.text_content == other.text_content
            && self.metadata == other.metadata
    }

    /// Number of body lines, counting an empty body as one empty line.
    pub fn line_count(&self) -> usize {
        self.text_content.split('\n').count()
    }
}
