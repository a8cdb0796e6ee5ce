pub mod cell;
pub mod notebook;

pub use cell::{Cell, CellId, CellMetadata};
pub use notebook::{
    FormatDeclaration, NotebookContent, NotebookMetadata, NotebookSettings, PluginDeclaration,
};
