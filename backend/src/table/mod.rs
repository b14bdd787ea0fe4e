//! Storage behind the `tasks` table endpoints.

mod memory;
mod redis_table;

use async_trait::async_trait;
use shared::{SortOrder, Task, TaskFields};

use crate::error::Result;

pub use memory::MemoryTable;
pub use redis_table::RedisTable;

/// Row storage keyed by task id. Every call is a single read or write; there
/// is no cross-row transaction.
#[async_trait]
pub trait TaskTable: Send + Sync {
    async fn select_all(&self, order: SortOrder) -> Result<Vec<Task>>;

    async fn get(&self, id: &str) -> Result<Task>;

    /// Fails with `Conflict` when a row with the same id exists.
    async fn insert(&self, task: Task) -> Result<Task>;

    /// Merges `fields` into the stored row and returns the result.
    async fn update(&self, id: &str, fields: TaskFields) -> Result<Task>;

    async fn delete(&self, id: &str) -> Result<()>;
}
