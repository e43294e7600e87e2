//! Task table view.
//!
//! Everything here is plain state and pure functions: the projection of the
//! task list under the active filters and sort, the delete confirmation and
//! edit modal, the create/edit form, and text rendering. Row actions come
//! back as [`TableAction`] values for the shell to execute.

pub mod filter;
pub mod form;
pub mod overlay;
pub mod render;
pub mod sort;
mod table;

pub use filter::{PriorityFilter, Selection, StatusFilter, TaskFilter};
pub use form::TaskForm;
pub use overlay::{CloseReason, DeleteConfirmation, EditModal};
pub use render::{EMPTY_STATE, OutputFormat};
pub use sort::{SortColumn, SortDirection, SortState};
pub use table::{TableAction, TaskTable, project};
