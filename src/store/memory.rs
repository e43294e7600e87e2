//! Process-lifetime task store backed by a vector.

use chrono::{DateTime, Utc};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;
use uuid::Uuid;

use super::TaskStore;
use crate::error::{TaskError, TaskResult};
use crate::types::{NewTask, Task, TaskPatch};

/// In-memory store. Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tasks: Mutex<Vec<Task>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with existing records (ids are kept as-is).
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: Mutex::new(tasks),
        }
    }

    fn tasks(&self) -> MutexGuard<'_, Vec<Task>> {
        // A panic while holding the lock cannot leave a half-written record:
        // every mutation below is a single push/assign/remove.
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn now() -> DateTime<Utc> {
    Utc::now()
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

impl TaskStore for MemoryStore {
    fn list(&self) -> Vec<Task> {
        self.tasks().clone()
    }

    fn get(&self, id: &str) -> TaskResult<Task> {
        self.tasks()
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| TaskError::not_found(id))
    }

    fn create(&self, new_task: NewTask) -> TaskResult<Task> {
        if is_blank(&new_task.title) {
            return Err(TaskError::TitleRequired);
        }

        let timestamp = now();
        let task = Task {
            id: Uuid::new_v4().to_string(),
            title: new_task.title,
            description: new_task.description.unwrap_or_default(),
            status: new_task.status.unwrap_or_default(),
            priority: new_task.priority.unwrap_or_default(),
            created_at: timestamp,
            updated_at: timestamp,
        };

        self.tasks().push(task.clone());
        debug!(task_id = %task.id, "Task created");
        Ok(task)
    }

    fn update(&self, id: &str, patch: TaskPatch) -> TaskResult<Task> {
        let mut tasks = self.tasks();
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| TaskError::not_found(id))?;

        if patch.title.as_deref().is_some_and(is_blank) {
            return Err(TaskError::TitleEmpty);
        }

        patch.apply_to(task);
        task.updated_at = now().max(task.created_at);
        debug!(task_id = %id, "Task updated");
        Ok(task.clone())
    }

    fn delete(&self, id: &str) -> TaskResult<()> {
        let mut tasks = self.tasks();
        let index = tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| TaskError::not_found(id))?;
        tasks.remove(index);
        debug!(task_id = %id, "Task deleted");
        Ok(())
    }

    fn len(&self) -> usize {
        self.tasks().len()
    }
}
