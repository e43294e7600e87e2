//! Request handlers for the task endpoints.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{ApiError, AppState};
use crate::error::TaskError;
use crate::types::{NewTask, Task, TaskPatch, TaskPriority, TaskStatus};

/// Body of `POST /tasks`.
///
/// Enum fields arrive as plain strings so unknown values can be reported as
/// `{"error": "Invalid status"}` instead of a generic decode failure.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CreateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
}

impl CreateTaskRequest {
    /// A blank or missing title is reported before any enum value.
    pub fn into_new_task(self) -> Result<NewTask, TaskError> {
        let title = self.title.unwrap_or_default();
        if title.trim().is_empty() {
            return Err(TaskError::TitleRequired);
        }
        Ok(NewTask {
            title,
            description: self.description,
            status: self.status.as_deref().map(TaskStatus::parse).transpose()?,
            priority: self.priority.as_deref().map(TaskPriority::parse).transpose()?,
        })
    }
}

/// Body of `PUT /tasks/{id}`. Absent or `null` fields are left unchanged.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
}

impl UpdateTaskRequest {
    pub fn into_patch(self) -> Result<TaskPatch, TaskError> {
        Ok(TaskPatch {
            title: self.title,
            description: self.description,
            status: self.status.as_deref().map(TaskStatus::parse).transpose()?,
            priority: self.priority.as_deref().map(TaskPriority::parse).transpose()?,
        })
    }
}

/// Health check response.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// API root - greeting message.
pub(super) async fn api_root() -> impl IntoResponse {
    Json(serde_json::json!({ "message": "API - 👋🌎🌍🌏" }))
}

/// Health check endpoint.
pub(super) async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /tasks`
pub(super) async fn list_tasks(State(state): State<AppState>) -> Json<Vec<Task>> {
    Json(state.store().list())
}

/// `GET /tasks/{id}`
pub(super) async fn get_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Result<Json<Task>, ApiError> {
    Ok(Json(state.store().get(&task_id)?))
}

/// `POST /tasks`
pub(super) async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let Json(request) = payload?;
    let task = state.store().create(request.into_new_task()?)?;
    info!(task_id = %task.id, title = %task.title, "Created task");
    Ok((StatusCode::CREATED, Json(task)))
}

/// `PUT /tasks/{id}`
pub(super) async fn update_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
    payload: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> Result<Json<Task>, ApiError> {
    let Json(request) = payload?;
    // Unknown ids are 404 whatever the body holds.
    state.store().get(&task_id)?;
    let task = state.store().update(&task_id, request.into_patch()?)?;
    info!(task_id = %task.id, status = %task.status, "Updated task");
    Ok(Json(task))
}

/// `DELETE /tasks/{id}`
pub(super) async fn delete_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.store().delete(&task_id)?;
    info!(task_id = %task_id, "Deleted task");
    Ok(StatusCode::NO_CONTENT)
}

/// Fallback for unknown routes.
pub(super) async fn not_found() -> ApiError {
    ApiError::RouteNotFound
}
