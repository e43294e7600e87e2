//! Application shell.
//!
//! Holds the canonical task list on the client side and runs every mutation
//! through a [`TaskApi`]. On failure the list is left exactly as it was and a
//! single banner message replaces any previous one.

use tracing::{error, info, warn};

use crate::client::{ClientError, ClientResult, TaskApi};
use crate::types::{NewTask, Task, TaskPatch, TaskStatus};
use crate::view::{TableAction, TaskForm};

/// Banner shown when the initial load fails.
pub const LOAD_FAILED: &str = "Failed to load tasks. Please try again later.";

pub struct Shell<A: TaskApi> {
    api: A,
    tasks: Vec<Task>,
    loading: bool,
    error: Option<String>,
    editing: Option<Task>,
    form: TaskForm,
}

/// Banner text for a failed mutation: the fixed message, plus the server's
/// detail when it sent one.
fn banner(err: &ClientError) -> String {
    match err.detail() {
        Some(detail) => format!("{}: {}", err, detail),
        None => err.to_string(),
    }
}

impl<A: TaskApi> Shell<A> {
    /// A shell that has not loaded yet (`is_loading()` is true).
    pub fn new(api: A) -> Self {
        Self {
            api,
            tasks: Vec::new(),
            loading: true,
            error: None,
            editing: None,
            form: TaskForm::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn editing(&self) -> Option<&Task> {
        self.editing.as_ref()
    }

    pub fn form(&self) -> &TaskForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut TaskForm {
        &mut self.form
    }

    /// Fetch the full list, replacing the local one on success.
    pub async fn load(&mut self) -> ClientResult<()> {
        self.loading = true;
        let result = self.api.list_tasks().await;
        self.loading = false;

        match result {
            Ok(tasks) => {
                info!(count = tasks.len(), "Loaded tasks");
                self.tasks = tasks;
                self.error = None;
                Ok(())
            }
            Err(e) => {
                error!(error = %e, status = ?e.status(), detail = ?e.detail(), "Failed to load tasks");
                self.error = Some(LOAD_FAILED.to_string());
                Err(e)
            }
        }
    }

    pub async fn create(&mut self, new_task: NewTask) -> ClientResult<Task> {
        match self.api.create_task(&new_task).await {
            Ok(task) => {
                self.tasks.push(task.clone());
                Ok(task)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Update a task and replace the local copy with the server's record.
    pub async fn update(&mut self, id: &str, patch: TaskPatch) -> ClientResult<Task> {
        match self.api.update_task(id, &patch).await {
            Ok(task) => {
                if let Some(slot) = self.tasks.iter_mut().find(|t| t.id == id) {
                    *slot = task.clone();
                }
                self.editing = None;
                Ok(task)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    pub async fn delete(&mut self, id: &str) -> ClientResult<()> {
        match self.api.delete_task(id).await {
            Ok(()) => {
                self.tasks.retain(|t| t.id != id);
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Row-level status change: an update carrying only `status`.
    pub async fn change_status(&mut self, id: &str, status: TaskStatus) -> ClientResult<Task> {
        self.update(id, TaskPatch::status(status)).await
    }

    /// Execute an action produced by the task table.
    pub async fn apply(&mut self, action: TableAction) -> ClientResult<()> {
        match action {
            TableAction::ChangeStatus { id, status } => {
                self.change_status(&id, status).await.map(|_| ())
            }
            TableAction::Update { id, patch } => self.update(&id, patch).await.map(|_| ()),
            TableAction::Delete { id } => self.delete(&id).await,
        }
    }

    /// Put the form into edit mode for `task`. No network call.
    pub fn begin_edit(&mut self, task: &Task) {
        self.form = TaskForm::from_task(task);
        self.editing = Some(task.clone());
    }

    /// Leave edit mode. No network call.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
        self.form.reset();
    }

    /// Submit the form: update the edited task, or create a new one and
    /// reset the form. Returns `None` when the title is empty.
    pub async fn submit_form(&mut self) -> Option<ClientResult<Task>> {
        if !self.form.is_submittable() {
            return None;
        }

        let result = match self.editing.as_ref().map(|t| t.id.clone()) {
            Some(id) => {
                let patch = self.form.to_patch();
                let result = self.update(&id, patch).await;
                if result.is_ok() {
                    self.form.reset();
                }
                result
            }
            None => {
                let new_task = self.form.to_new_task();
                self.form.reset();
                self.create(new_task).await
            }
        };
        Some(result)
    }

    fn fail(&mut self, err: ClientError) -> ClientError {
        warn!(error = %err, status = ?err.status(), detail = ?err.detail(), "Request failed");
        self.error = Some(banner(&err));
        err
    }
}
