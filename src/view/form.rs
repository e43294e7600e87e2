//! Create/edit form state.

use chrono::Utc;

use crate::types::{NewTask, Task, TaskPatch, TaskPriority, TaskStatus};

/// Field values of the task form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub priority: TaskPriority,
    pub status: TaskStatus,
}

impl TaskForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Form pre-populated with a task's current values.
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            priority: task.priority,
            status: task.status,
        }
    }

    /// Back to an empty title/description, medium priority, todo status.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The title input is required; anything non-empty may be submitted.
    pub fn is_submittable(&self) -> bool {
        !self.title.is_empty()
    }

    pub fn to_new_task(&self) -> NewTask {
        NewTask {
            title: self.title.clone(),
            description: Some(self.description.clone()),
            status: Some(self.status),
            priority: Some(self.priority),
        }
    }

    /// Patch carrying every form field.
    pub fn to_patch(&self) -> TaskPatch {
        TaskPatch {
            title: Some(self.title.clone()),
            description: Some(self.description.clone()),
            status: Some(self.status),
            priority: Some(self.priority),
        }
    }

    /// `task` with the form's fields applied and `updated_at` bumped locally.
    pub fn apply_to(&self, task: &Task) -> Task {
        Task {
            title: self.title.clone(),
            description: self.description.clone(),
            priority: self.priority,
            status: self.status,
            updated_at: Utc::now().max(task.created_at),
            ..task.clone()
        }
    }
}
