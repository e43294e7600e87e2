//! HTTP API server.
//!
//! Exposes the task store as JSON-over-HTTP CRUD under `/api/v1`.

mod error;
mod handlers;
mod lifecycle;

pub use error::ApiError;
pub use handlers::{CreateTaskRequest, UpdateTaskRequest};
pub use lifecycle::{ServerHandle, build_router, serve, start_server};

use std::sync::Arc;

use crate::store::TaskStore;

/// Route prefix shared by every API endpoint.
pub const API_PREFIX: &str = "/api/v1";

/// State shared across handlers.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn TaskStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn TaskStore> {
        &self.store
    }
}
