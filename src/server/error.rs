//! HTTP rendering of failures.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::debug;

use crate::error::{ErrorBody, TaskError};

/// Failure of a request, rendered as `{"error": "..."}` with a 4xx status.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Task(#[from] TaskError),

    #[error("Invalid request body")]
    InvalidBody(String),

    #[error("Not found")]
    RouteNotFound,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Task(err) if err.is_not_found() => StatusCode::NOT_FOUND,
            ApiError::Task(_) | ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::RouteNotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            ApiError::InvalidBody(detail) => debug!(%detail, "Rejected request body"),
            other => debug!(error = %other, status = %status, "Request failed"),
        }
        (status, Json(ErrorBody::new(self.to_string()))).into_response()
    }
}
