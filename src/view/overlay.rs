//! Delete confirmation and edit modal.
//!
//! Both are two-state machines (closed/open). Opening captures what the
//! action will act on, so later changes to filters or the task list cannot
//! retarget it.

use crate::types::Task;

use super::form::TaskForm;

/// Confirmation gate in front of a delete.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DeleteConfirmation {
    #[default]
    Closed,
    Open {
        task_id: String,
    },
}

impl DeleteConfirmation {
    pub const TITLE: &'static str = "Confirm Delete";
    pub const MESSAGE: &'static str =
        "Are you sure you want to delete this task? This action cannot be undone.";
    pub const CONFIRM_LABEL: &'static str = "Delete";
    pub const CANCEL_LABEL: &'static str = "Cancel";

    /// Open for `task_id`, replacing any previously held target.
    pub fn open(&mut self, task_id: impl Into<String>) {
        *self = DeleteConfirmation::Open {
            task_id: task_id.into(),
        };
    }

    pub fn is_open(&self) -> bool {
        matches!(self, DeleteConfirmation::Open { .. })
    }

    pub fn target(&self) -> Option<&str> {
        match self {
            DeleteConfirmation::Open { task_id } => Some(task_id),
            DeleteConfirmation::Closed => None,
        }
    }

    /// Close and hand back the captured id to delete.
    pub fn confirm(&mut self) -> Option<String> {
        match std::mem::take(self) {
            DeleteConfirmation::Open { task_id } => Some(task_id),
            DeleteConfirmation::Closed => None,
        }
    }

    /// Close without acting.
    pub fn cancel(&mut self) {
        *self = DeleteConfirmation::Closed;
    }
}

/// How the edit modal was dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    Button,
    OutsideClick,
    Escape,
}

/// Modal editing a snapshot of one task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditModal {
    #[default]
    Closed,
    Open {
        task: Task,
        form: TaskForm,
    },
}

impl EditModal {
    /// Open on a snapshot of `task`, with the form pre-populated.
    pub fn open(&mut self, task: &Task) {
        *self = EditModal::Open {
            task: task.clone(),
            form: TaskForm::from_task(task),
        };
    }

    pub fn is_open(&self) -> bool {
        matches!(self, EditModal::Open { .. })
    }

    pub fn task(&self) -> Option<&Task> {
        match self {
            EditModal::Open { task, .. } => Some(task),
            EditModal::Closed => None,
        }
    }

    pub fn form(&self) -> Option<&TaskForm> {
        match self {
            EditModal::Open { form, .. } => Some(form),
            EditModal::Closed => None,
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut TaskForm> {
        match self {
            EditModal::Open { form, .. } => Some(form),
            EditModal::Closed => None,
        }
    }

    /// Close and return the edited snapshot.
    ///
    /// Returns `None` (and stays open) while the title is empty, and `None`
    /// when already closed.
    pub fn submit(&mut self) -> Option<Task> {
        if !self.form().is_some_and(TaskForm::is_submittable) {
            return None;
        }
        match std::mem::take(self) {
            EditModal::Open { task, form } => Some(form.apply_to(&task)),
            EditModal::Closed => None,
        }
    }

    /// Dismiss without submitting.
    pub fn close(&mut self, reason: CloseReason) {
        if self.is_open() {
            tracing::trace!(?reason, "Edit modal dismissed");
        }
        *self = EditModal::Closed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TaskPriority, TaskStatus};
    use chrono::Utc;

    fn task() -> Task {
        let now = Utc::now();
        Task {
            id: "1".into(),
            title: "Complete project".into(),
            description: "Finish it".into(),
            status: TaskStatus::Todo,
            priority: TaskPriority::High,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn confirm_yields_captured_id_once() {
        let mut dialog = DeleteConfirmation::default();
        dialog.open("1");
        assert_eq!(dialog.target(), Some("1"));
        assert_eq!(dialog.confirm(), Some("1".to_string()));
        assert!(!dialog.is_open());
        assert_eq!(dialog.confirm(), None);
    }

    #[test]
    fn cancel_discards_target() {
        let mut dialog = DeleteConfirmation::default();
        dialog.open("1");
        dialog.cancel();
        assert_eq!(dialog.confirm(), None);
    }

    #[test]
    fn submit_returns_full_snapshot() {
        let original = task();
        let mut modal = EditModal::default();
        modal.open(&original);
        modal.form_mut().unwrap().title = "Updated Title".into();

        let edited = modal.submit().unwrap();
        assert_eq!(edited.id, original.id);
        assert_eq!(edited.title, "Updated Title");
        assert_eq!(edited.description, original.description);
        assert_eq!(edited.priority, original.priority);
        assert_eq!(edited.created_at, original.created_at);
        assert!(!modal.is_open());
    }

    #[test]
    fn empty_title_keeps_modal_open() {
        let mut modal = EditModal::default();
        modal.open(&task());
        modal.form_mut().unwrap().title.clear();
        assert_eq!(modal.submit(), None);
        assert!(modal.is_open());
    }

    #[test]
    fn close_fires_nothing() {
        for reason in [CloseReason::Button, CloseReason::OutsideClick, CloseReason::Escape] {
            let mut modal = EditModal::default();
            modal.open(&task());
            modal.close(reason);
            assert!(!modal.is_open());
            assert_eq!(modal.submit(), None);
        }
    }
}
