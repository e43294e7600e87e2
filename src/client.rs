//! API client.
//!
//! [`TaskApi`] is the typed surface the shell talks to. [`HttpClient`] issues
//! one HTTP call per operation; [`StoreApi`] serves the same calls from an
//! in-process store.

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::error::{ErrorBody, TaskError};
use crate::store::TaskStore;
use crate::types::{NewTask, Task, TaskPatch};

/// The call that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListTasks,
    GetTask,
    CreateTask,
    UpdateTask,
    DeleteTask,
}

impl Operation {
    /// Fixed user-facing message for a failed call.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::ListTasks => "Failed to fetch tasks",
            Operation::GetTask => "Failed to fetch task",
            Operation::CreateTask => "Failed to create task",
            Operation::UpdateTask => "Failed to update task",
            Operation::DeleteTask => "Failed to delete task",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::ListTasks => "list_tasks",
            Operation::GetTask => "get_task",
            Operation::CreateTask => "create_task",
            Operation::UpdateTask => "update_task",
            Operation::DeleteTask => "delete_task",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Non-2xx response or transport failure. `status` is `None` when no
    /// response arrived; `detail` carries the server's `error` string if any.
    #[error("{}", .operation.failure_message())]
    RequestFailed {
        operation: Operation,
        status: Option<u16>,
        detail: Option<String>,
    },

    #[error("Invalid API URL: {0}")]
    InvalidBaseUrl(String),
}

impl ClientError {
    pub fn request_failed(operation: Operation, status: Option<u16>, detail: Option<String>) -> Self {
        ClientError::RequestFailed {
            operation,
            status,
            detail,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::RequestFailed { status, .. } => *status,
            ClientError::InvalidBaseUrl(_) => None,
        }
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            ClientError::RequestFailed { detail, .. } => detail.as_deref(),
            ClientError::InvalidBaseUrl(_) => None,
        }
    }
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// Typed task operations.
#[async_trait]
pub trait TaskApi: Send + Sync {
    async fn list_tasks(&self) -> ClientResult<Vec<Task>>;
    async fn get_task(&self, id: &str) -> ClientResult<Task>;
    async fn create_task(&self, new_task: &NewTask) -> ClientResult<Task>;
    async fn update_task(&self, id: &str, patch: &TaskPatch) -> ClientResult<Task>;
    async fn delete_task(&self, id: &str) -> ClientResult<()>;
}

/// reqwest-backed client for the HTTP API.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: Url,
}

impl HttpClient {
    /// Create a client for an API root such as `http://localhost:5000/api/v1`.
    pub fn new(base_url: &str) -> ClientResult<Self> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| ClientError::InvalidBaseUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self {
            client: Client::new(),
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `<base>/tasks[/<id>]`, with the id percent-encoded as one segment.
    fn tasks_url(&self, id: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("tasks");
            if let Some(id) = id {
                segments.push(id);
            }
        }
        url
    }

    async fn send<B, T>(
        &self,
        operation: Operation,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> ClientResult<Option<T>>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        debug!(%operation, %method, %url, "Sending request");
        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ClientError::request_failed(operation, None, Some(e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            // Keep whatever structured detail the server sent.
            let detail = response
                .json::<ErrorBody>()
                .await
                .ok()
                .map(|body| body.error);
            return Err(ClientError::request_failed(
                operation,
                Some(status.as_u16()),
                detail,
            ));
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        response.json::<T>().await.map(Some).map_err(|e| {
            ClientError::request_failed(operation, Some(status.as_u16()), Some(e.to_string()))
        })
    }

    async fn send_expecting<B, T>(
        &self,
        operation: Operation,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> ClientResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        self.send(operation, method, url, body).await?.ok_or_else(|| {
            ClientError::request_failed(operation, Some(204), Some("empty response body".into()))
        })
    }
}

#[async_trait]
impl TaskApi for HttpClient {
    async fn list_tasks(&self) -> ClientResult<Vec<Task>> {
        self.send_expecting::<(), _>(Operation::ListTasks, Method::GET, self.tasks_url(None), None)
            .await
    }

    async fn get_task(&self, id: &str) -> ClientResult<Task> {
        self.send_expecting::<(), _>(Operation::GetTask, Method::GET, self.tasks_url(Some(id)), None)
            .await
    }

    async fn create_task(&self, new_task: &NewTask) -> ClientResult<Task> {
        self.send_expecting(
            Operation::CreateTask,
            Method::POST,
            self.tasks_url(None),
            Some(new_task),
        )
        .await
    }

    async fn update_task(&self, id: &str, patch: &TaskPatch) -> ClientResult<Task> {
        self.send_expecting(
            Operation::UpdateTask,
            Method::PUT,
            self.tasks_url(Some(id)),
            Some(patch),
        )
        .await
    }

    async fn delete_task(&self, id: &str) -> ClientResult<()> {
        self.send::<(), serde_json::Value>(
            Operation::DeleteTask,
            Method::DELETE,
            self.tasks_url(Some(id)),
            None,
        )
        .await
        .map(|_| ())
    }
}

/// [`TaskApi`] served directly from a store, without HTTP.
///
/// Failures carry the status code the HTTP layer would have produced.
#[derive(Clone)]
pub struct StoreApi {
    store: Arc<dyn TaskStore>,
}

impl StoreApi {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn TaskStore> {
        &self.store
    }
}

fn store_failure(operation: Operation, err: TaskError) -> ClientError {
    let status = if err.is_not_found() { 404 } else { 400 };
    ClientError::request_failed(operation, Some(status), Some(err.to_string()))
}

#[async_trait]
impl TaskApi for StoreApi {
    async fn list_tasks(&self) -> ClientResult<Vec<Task>> {
        Ok(self.store.list())
    }

    async fn get_task(&self, id: &str) -> ClientResult<Task> {
        self.store
            .get(id)
            .map_err(|e| store_failure(Operation::GetTask, e))
    }

    async fn create_task(&self, new_task: &NewTask) -> ClientResult<Task> {
        self.store
            .create(new_task.clone())
            .map_err(|e| store_failure(Operation::CreateTask, e))
    }

    async fn update_task(&self, id: &str, patch: &TaskPatch) -> ClientResult<Task> {
        self.store
            .update(id, patch.clone())
            .map_err(|e| store_failure(Operation::UpdateTask, e))
    }

    async fn delete_task(&self, id: &str) -> ClientResult<()> {
        self.store
            .delete(id)
            .map_err(|e| store_failure(Operation::DeleteTask, e))
    }
}
