use serde_yaml::Value;
use thiserror::Error;

use crate::models::{Cell, CellId, NotebookContent};

use super::{patch::Patch, registry::CellTypeRegistry};

/// Where a new cell goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertPosition {
    Start,
    End,
    Before(CellId),
    After(CellId),
    /// Index in the cell list; `len` appends.
    At(usize),
}

/// Edit commands over a notebook's cells.
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    /// Inserts a new cell. Without an explicit type it inherits the type of
    /// the neighbouring cell, or the registry default in an empty notebook.
    InsertCell {
        position: InsertPosition,
        cell_type: Option<String>,
        text: String,
    },
    RemoveCell {
        id: CellId,
    },
    /// Moves a cell to `to_index`, clamped to the last slot.
    MoveCell {
        id: CellId,
        to_index: usize,
    },
    ChangeCellType {
        id: CellId,
        cell_type: String,
    },
    SetText {
        id: CellId,
        text: String,
    },
    SetProperty {
        id: CellId,
        name: String,
        value: Value,
    },
    RemoveProperty {
        id: CellId,
        name: String,
    },
    /// Absent becomes `true`, present is removed.
    ToggleProperty {
        id: CellId,
        name: String,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("cell not found: {0}")]
    CellNotFound(CellId),
    #[error("index {index} out of bounds for {len} cells")]
    IndexOutOfBounds { index: usize, len: usize },
}

impl NotebookContent {
    /// Applies `cmd`, reporting which cells changed.
    pub fn apply(
        &mut self,
        cmd: Cmd,
        registry: &dyn CellTypeRegistry,
    ) -> Result<Patch, EditError> {
        match cmd {
            Cmd::InsertCell {
                position,
                cell_type,
                text,
            } => self.insert_cell(position, cell_type, text, registry),
            Cmd::RemoveCell { id } => {
                let index = self.require_index(&id)?;
                self.cells.remove(index);
                Ok(Patch::for_removed(id))
            }
            Cmd::MoveCell { id, to_index } => {
                let from = self.require_index(&id)?;
                let cell = self.cells.remove(from);
                let to = to_index.min(self.cells.len());
                self.cells.insert(to, cell);
                Ok(Patch::for_changed(id))
            }
            Cmd::ChangeCellType { id, cell_type } => {
                let cell_type = registry.canonical_name(&cell_type);
                self.require_cell(&id)?.cell_type = cell_type;
                Ok(Patch::for_changed(id))
            }
            Cmd::SetText { id, text } => {
                self.require_cell(&id)?.text_content = text;
                Ok(Patch::for_changed(id))
            }
            Cmd::SetProperty { id, name, value } => {
                self.require_cell(&id)?.metadata.set_property(&name, value);
                Ok(Patch::for_changed(id))
            }
            Cmd::RemoveProperty { id, name } => {
                self.require_cell(&id)?.metadata.remove_property(&name);
                Ok(Patch::for_changed(id))
            }
            Cmd::ToggleProperty { id, name } => {
                let metadata = &mut self.require_cell(&id)?.metadata;
                if metadata.remove_property(&name).is_none() {
                    metadata.set_property(&name, Value::Bool(true));
                }
                Ok(Patch::for_changed(id))
            }
        }
    }

    fn insert_cell(
        &mut self,
        position: InsertPosition,
        cell_type: Option<String>,
        text: String,
        registry: &dyn CellTypeRegistry,
    ) -> Result<Patch, EditError> {
        let len = self.cells.len();
        // (insertion index, index of the cell whose type is inherited)
        let (index, neighbour) = match position {
            InsertPosition::Start => (0, Some(0)),
            InsertPosition::End => (len, len.checked_sub(1)),
            InsertPosition::Before(id) => {
                let i = self.require_index(&id)?;
                (i, Some(i))
            }
            InsertPosition::After(id) => {
                let i = self.require_index(&id)?;
                (i + 1, Some(i))
            }
            InsertPosition::At(i) if i <= len => (i, i.checked_sub(1).or(Some(0))),
            InsertPosition::At(index) => return Err(EditError::IndexOutOfBounds { index, len }),
        };

        let cell_type = match cell_type {
            Some(t) => registry.canonical_name(&t),
            None => neighbour
                .and_then(|i| self.cells.get(i))
                .map(|c| c.cell_type.clone())
                .unwrap_or_else(|| registry.default_cell_type().to_string()),
        };

        let cell = Cell::new(cell_type, text);
        let id = cell.id.clone();
        self.cells.insert(index, cell);
        Ok(Patch::for_changed(id))
    }

    fn require_index(&self, id: &CellId) -> Result<usize, EditError> {
        self.index_of(id)
            .ok_or_else(|| EditError::CellNotFound(id.clone()))
    }

    fn require_cell(&mut self, id: &CellId) -> Result<&mut Cell, EditError> {
        self.cell_mut(id)
            .ok_or_else(|| EditError::CellNotFound(id.clone()))
    }
}
