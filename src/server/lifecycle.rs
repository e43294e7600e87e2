//! Router construction and server lifecycle.

use axum::Router;
use axum::routing::get;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use super::{AppState, handlers};
use crate::store::TaskStore;

/// Build the router with all routes.
pub fn build_router(store: Arc<dyn TaskStore>) -> Router {
    // The browser client is served from a different origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/v1", get(handlers::api_root))
        .route("/api/v1/health", get(handlers::health))
        .route(
            "/api/v1/tasks",
            get(handlers::list_tasks).post(handlers::create_task),
        )
        .route(
            "/api/v1/tasks/{task_id}",
            get(handlers::get_task)
                .put(handlers::update_task)
                .delete(handlers::delete_task),
        )
        .fallback(handlers::not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(AppState::new(store))
}

/// Handle for a server running in a background task.
pub struct ServerHandle {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    join: JoinHandle<()>,
}

impl ServerHandle {
    /// Address the server is bound to.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Base URL of the API, e.g. `http://127.0.0.1:5000/api/v1`.
    pub fn api_url(&self) -> String {
        format!("http://{}{}", self.addr, super::API_PREFIX)
    }

    /// Signal shutdown and wait for in-flight requests to finish.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Err(e) = self.join.await {
            error!("Server task failed: {}", e);
        }
    }
}

/// Bind `addr` and serve in a background task.
///
/// Port 0 picks an ephemeral port; the bound address is available from the
/// returned handle.
pub async fn start_server(
    store: Arc<dyn TaskStore>,
    addr: SocketAddr,
) -> anyhow::Result<ServerHandle> {
    let app = build_router(store);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let bound_addr = listener.local_addr()?;

    info!("Task API listening on http://{}", bound_addr);

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let join = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
                info!("Task API shutting down");
            })
            .await
        {
            error!("Task API server error: {}", e);
        }
    });

    Ok(ServerHandle {
        addr: bound_addr,
        shutdown_tx: Some(shutdown_tx),
        join,
    })
}

/// Serve in the foreground until Ctrl-C.
pub async fn serve(store: Arc<dyn TaskStore>, addr: SocketAddr) -> anyhow::Result<()> {
    let handle = start_server(store, addr).await?;
    tokio::signal::ctrl_c().await?;
    info!("Received Ctrl-C");
    handle.shutdown().await;
    Ok(())
}
