use std::collections::HashMap;

use async_trait::async_trait;
use shared::{SortOrder, Task, TaskFields};
use tokio::sync::RwLock;

use super::TaskTable;
use crate::error::{ApiError, Result};

/// Non-persistent table for local runs and tests.
#[derive(Debug, Default)]
pub struct MemoryTable {
    rows: RwLock<HashMap<String, Task>>,
}

impl MemoryTable {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskTable for MemoryTable {
    async fn select_all(&self, order: SortOrder) -> Result<Vec<Task>> {
        let mut tasks: Vec<Task> = self.rows.read().await.values().cloned().collect();
        order.sort(&mut tasks);
        Ok(tasks)
    }

    async fn get(&self, id: &str) -> Result<Task> {
        self.rows
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(id.to_string()))
    }

    async fn insert(&self, task: Task) -> Result<Task> {
        let mut rows = self.rows.write().await;
        if rows.contains_key(&task.id) {
            return Err(ApiError::Conflict(task.id));
        }
        rows.insert(task.id.clone(), task.clone());
        Ok(task)
    }

    async fn update(&self, id: &str, fields: TaskFields) -> Result<Task> {
        let mut rows = self.rows.write().await;
        let task = rows
            .get_mut(id)
            .ok_or_else(|| ApiError::NotFound(id.to_string()))?;
        task.apply_fields(fields);
        Ok(task.clone())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.rows
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| ApiError::NotFound(id.to_string()))
    }
}
