//! HTTP service for the `tasks` table the board mirrors.

pub mod config;
pub mod error;
pub mod routes;
pub mod table;

use std::path::Path;
use std::sync::Arc;

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

pub use config::{ServerConfig, StorageKind};
pub use error::ApiError;
pub use table::{MemoryTable, RedisTable, TaskTable};

/// Builds the router: the table endpoints, a health check, and static assets
/// from `static_dir` for every other path.
pub fn app(table: Arc<dyn TaskTable>, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route(
            "/api/tasks",
            get(routes::list_tasks).post(routes::create_task),
        )
        .route(
            "/api/tasks/:id",
            get(routes::get_task)
                .put(routes::update_task)
                .delete(routes::delete_task),
        )
        .fallback_service(ServeDir::new(static_dir))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(table)
}
