use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use super::cell::{Cell, CellId};

/// Document-level metadata decoded from the YAML front matter.
///
/// Kept as an order-preserving mapping so keys this crate knows nothing about
/// are written back exactly where they were. The recognized `notebook` key is
/// decoded on demand through [`NotebookMetadata::settings`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotebookMetadata(Mapping);

impl NotebookMetadata {
    /// Key under which format and plugin declarations live.
    pub const SETTINGS_KEY: &'static str = "notebook";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: &str, value: Value) -> Option<Value> {
        self.0.insert(Value::String(key.to_string()), value)
    }

    pub fn as_mapping(&self) -> &Mapping {
        &self.0
    }

    /// Decodes the `notebook` key, if present.
    pub fn settings(&self) -> Result<Option<NotebookSettings>, serde_yaml::Error> {
        self.get(Self::SETTINGS_KEY)
            .map(|value| serde_yaml::from_value(value.clone()))
            .transpose()
    }

    /// Writes `settings` under the `notebook` key, replacing what was there.
    pub fn set_settings(&mut self, settings: &NotebookSettings) -> Result<(), serde_yaml::Error> {
        let value = serde_yaml::to_value(settings)?;
        self.insert(Self::SETTINGS_KEY, value);
        Ok(())
    }
}

impl From<Mapping> for NotebookMetadata {
    fn from(mapping: Mapping) -> Self {
        Self(mapping)
    }
}

/// Recognized document settings under the `notebook` front matter key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotebookSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<FormatDeclaration>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plugins: Vec<PluginDeclaration>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatDeclaration {
    pub name: String,
    pub version: String,
}

/// A plugin the runtime should load before running the notebook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginDeclaration {
    pub src: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub args: Value,
}

/// A parsed notebook: front matter metadata plus cells in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotebookContent {
    #[serde(default)]
    pub metadata: NotebookMetadata,
    #[serde(default)]
    pub cells: Vec<Cell>,
}

impl NotebookContent {
    pub fn new(metadata: NotebookMetadata, cells: Vec<Cell>) -> Self {
        Self { metadata, cells }
    }

    /// Structural equality that ignores cell ids.
    pub fn same_content(&self, other: &NotebookContent) -> bool {
        self.metadata == other.metadata
            && self.cells.len() == other.cells.len()
            && self
                .cells
                .iter()
                .zip(&other.cells)
                .all(|(a, b)| a.same_content(b))
    }

    pub fn index_of(&self, id: &CellId) -> Option<usize> {
        self.cells.iter().position(|c| &c.id == id)
    }

    pub fn cell(&self, id: &CellId) -> Option<&Cell> {
        self.cells.iter().find(|c| &c.id == id)
    }

    pub fn cell_mut(&mut self, id: &CellId) -> Option<&mut Cell> {
        self.cells.iter_mut().find(|c| &c.id == id)
    }
}
