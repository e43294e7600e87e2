//! Structured error types for task operations.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure of a store operation.
///
/// The display strings are part of the HTTP contract and are sent verbatim
/// in the `error` field of 4xx responses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    #[error("Title is required")]
    TitleRequired,

    #[error("Title cannot be empty")]
    TitleEmpty,

    #[error("Invalid status")]
    InvalidStatus(String),

    #[error("Invalid priority")]
    InvalidPriority(String),

    #[error("Task not found")]
    NotFound(String),
}

impl TaskError {
    pub fn not_found(task_id: impl Into<String>) -> Self {
        TaskError::NotFound(task_id.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, TaskError::NotFound(_))
    }
}

/// JSON body of every 4xx response: `{"error": "<message>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

impl From<&TaskError> for ErrorBody {
    fn from(err: &TaskError) -> Self {
        Self::new(err.to_string())
    }
}

/// Result type for store operations.
pub type TaskResult<T> = std::result::Result<T, TaskError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_http_contract() {
        assert_eq!(TaskError::TitleRequired.to_string(), "Title is required");
        assert_eq!(TaskError::TitleEmpty.to_string(), "Title cannot be empty");
        assert_eq!(TaskError::not_found("abc").to_string(), "Task not found");
    }

    #[test]
    fn error_body_shape() {
        let body = ErrorBody::from(&TaskError::TitleRequired);
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            serde_json::json!({ "error": "Title is required" })
        );
    }

    #[test]
    fn classification() {
        assert!(TaskError::not_found("x").is_not_found());
        assert!(!TaskError::TitleEmpty.is_not_found());
        assert!(!TaskError::InvalidStatus("done".into()).is_not_found());
    }
}
