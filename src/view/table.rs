//! Task table: projection of the task list plus row actions.

use crate::types::{Task, TaskPatch, TaskStatus};

use super::filter::{PriorityFilter, StatusFilter, TaskFilter};
use super::form::TaskForm;
use super::overlay::{CloseReason, DeleteConfirmation, EditModal};
use super::render;
use super::sort::{SortColumn, SortState};

/// Filter then sort `tasks` for display.
pub fn project<'a>(tasks: &'a [Task], filter: &TaskFilter, sort: &SortState) -> Vec<&'a Task> {
    let mut rows: Vec<&Task> = tasks.iter().filter(|t| filter.matches(t)).collect();
    sort.sort(&mut rows);
    rows
}

/// A mutation requested from the table, to be carried out by the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableAction {
    ChangeStatus { id: String, status: TaskStatus },
    Update { id: String, patch: TaskPatch },
    Delete { id: String },
}

/// View state of the task table.
#[derive(Debug, Clone, Default)]
pub struct TaskTable {
    filter: TaskFilter,
    sort: SortState,
    delete_confirmation: DeleteConfirmation,
    edit_modal: EditModal,
}

impl TaskTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, filter: TaskFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_sort(mut self, sort: SortState) -> Self {
        self.sort = sort;
        self
    }

    pub fn filter(&self) -> &TaskFilter {
        &self.filter
    }

    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filter.search = search.into();
    }

    pub fn set_status_filter(&mut self, status: StatusFilter) {
        self.filter.status = status;
    }

    pub fn set_priority_filter(&mut self, priority: PriorityFilter) {
        self.filter.priority = priority;
    }

    /// Header click on `column`.
    pub fn toggle_sort(&mut self, column: SortColumn) {
        self.sort.toggle(column);
    }

    /// Rows to display, in order.
    pub fn rows<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        project(tasks, &self.filter, &self.sort)
    }

    /// Status select on a row; applies immediately.
    pub fn change_status(&self, id: impl Into<String>, status: TaskStatus) -> TableAction {
        TableAction::ChangeStatus {
            id: id.into(),
            status,
        }
    }

    /// Delete button on a row; only opens the confirmation.
    pub fn request_delete(&mut self, id: impl Into<String>) {
        self.delete_confirmation.open(id);
    }

    pub fn delete_confirmation(&self) -> &DeleteConfirmation {
        &self.delete_confirmation
    }

    pub fn confirm_delete(&mut self) -> Option<TableAction> {
        self.delete_confirmation
            .confirm()
            .map(|id| TableAction::Delete { id })
    }

    pub fn cancel_delete(&mut self) {
        self.delete_confirmation.cancel();
    }

    /// Edit button on a row.
    pub fn start_edit(&mut self, task: &Task) {
        self.edit_modal.open(task);
    }

    pub fn edit_modal(&self) -> &EditModal {
        &self.edit_modal
    }

    pub fn edit_form_mut(&mut self) -> Option<&mut TaskForm> {
        self.edit_modal.form_mut()
    }

    /// Submit the edit modal; the update carries the full record.
    pub fn submit_edit(&mut self) -> Option<TableAction> {
        self.edit_modal.submit().map(|task| TableAction::Update {
            patch: TaskPatch::full(&task),
            id: task.id,
        })
    }

    pub fn close_edit(&mut self, reason: CloseReason) {
        self.edit_modal.close(reason);
    }

    /// Render the current projection as a text table.
    pub fn render(&self, tasks: &[Task]) -> String {
        render::format_task_table(&self.rows(tasks), &self.sort)
    }
}
