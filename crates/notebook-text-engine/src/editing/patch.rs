use crate::models::CellId;

/// Result of applying a command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Patch {
    /// Cells that were created or modified.
    pub changed: Vec<CellId>,
    pub removed: Vec<CellId>,
}

impl Patch {
    pub fn for_changed(id: CellId) -> Self {
        Self {
            changed: vec![id],
            removed: vec![],
        }
    }

    pub fn for_removed(id: CellId) -> Self {
        Self {
            changed: vec![],
            removed: vec![id],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.changed.is_empty() && self.removed.is_empty()
    }
}
