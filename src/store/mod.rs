//! Task storage.
//!
//! The store owns the authoritative collection of tasks. It is built once per
//! process and shared with the HTTP layer as `Arc<dyn TaskStore>`, so another
//! backend can replace [`MemoryStore`] without touching the handlers.

mod memory;

pub use memory::MemoryStore;

use crate::error::TaskResult;
use crate::types::{NewTask, Task, TaskPatch};

/// Operations over the task collection.
pub trait TaskStore: Send + Sync {
    /// All tasks in insertion order.
    fn list(&self) -> Vec<Task>;

    /// Fetch one task by id.
    fn get(&self, id: &str) -> TaskResult<Task>;

    /// Validate and insert a new task, assigning its id and timestamps.
    fn create(&self, new_task: NewTask) -> TaskResult<Task>;

    /// Merge the provided fields over an existing task and refresh `updated_at`.
    fn update(&self, id: &str, patch: TaskPatch) -> TaskResult<Task>;

    /// Remove a task.
    fn delete(&self, id: &str) -> TaskResult<()>;

    /// Number of stored tasks.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
