use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use shared::{SortOrder, Task, TaskFields};
use tracing::info;

use crate::error::{ApiError, Result};
use crate::table::TaskTable;

pub type SharedTable = Arc<dyn TaskTable>;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    order: Option<String>,
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn list_tasks(
    State(table): State<SharedTable>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Task>>> {
    let order = SortOrder::from_query(query.order.as_deref()).ok_or_else(|| {
        ApiError::BadRequest(format!(
            "order must be asc or desc, got {:?}",
            query.order.unwrap_or_default()
        ))
    })?;
    Ok(Json(table.select_all(order).await?))
}

pub async fn get_task(
    State(table): State<SharedTable>,
    Path(id): Path<String>,
) -> Result<Json<Task>> {
    Ok(Json(table.get(&id).await?))
}

/// Inserts a row exactly as the client sent it, id and timestamp included.
/// Rows are opaque here: a snapshot read earlier must always be writable
/// again.
pub async fn create_task(
    State(table): State<SharedTable>,
    Json(task): Json<Task>,
) -> Result<(StatusCode, Json<Task>)> {
    if task.id.is_empty() {
        return Err(ApiError::BadRequest("task id must not be empty".to_string()));
    }

    let task = table.insert(task).await?;
    info!(task_id = %task.id, "task inserted");
    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn update_task(
    State(table): State<SharedTable>,
    Path(id): Path<String>,
    Json(fields): Json<TaskFields>,
) -> Result<Json<Task>> {
    if fields.is_empty() {
        return Err(ApiError::BadRequest("no fields to update".to_string()));
    }

    let task = table.update(&id, fields).await?;
    info!(task_id = %id, "task updated");
    Ok(Json(task))
}

pub async fn delete_task(
    State(table): State<SharedTable>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    table.delete(&id).await?;
    info!(task_id = %id, "task deleted");
    Ok(Json(json!({ "message": "Task deleted successfully" })))
}
