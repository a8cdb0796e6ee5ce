/*!
 * # Editing Commands
 *
 * The live notebook mutates cells in place: it inserts, removes, moves and
 * retypes cells and toggles their properties. Every such edit is a [`Cmd`]
 * applied to a [`NotebookContent`](crate::models::NotebookContent):
 *
 * ```rust
 * use notebook_text_engine::editing::*;
 * use notebook_text_engine::models::NotebookContent;
 *
 * let mut content = NotebookContent::default();
 * let registry = BuiltinCellTypes::new();
 *
 * let patch = content
 *     .apply(
 *         Cmd::InsertCell {
 *             position: InsertPosition::End,
 *             cell_type: None,
 *             text: String::new(),
 *         },
 *         &registry,
 *     )
 *     .unwrap();
 *
 * assert_eq!(content.cells[0].cell_type, "markdown");
 * assert_eq!(patch.changed, [content.cells[0].id.clone()]);
 * ```
 *
 * Cell types are resolved through a [`CellTypeRegistry`] passed in by the
 * caller. Parsing never consults it.
 */

pub mod commands;
pub mod patch;
pub mod registry;

pub use commands::{Cmd, EditError, InsertPosition};
pub use patch::Patch;
pub use registry::{BuiltinCellTypes, CellTypeDefinition, CellTypeRegistry};
