use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client};
use shared::{SortOrder, Task, TaskFields};
use tracing::{debug, warn};

use super::TaskTable;
use crate::error::{ApiError, Result};

const KEY_PREFIX: &str = "task:";

/// One JSON string per row under `task:{id}`.
#[derive(Clone)]
pub struct RedisTable {
    conn: MultiplexedConnection,
}

impl RedisTable {
    pub async fn connect(url: &str) -> Result<Self> {
        let client = Client::open(url)?;
        let conn = client.get_multiplexed_async_connection().await?;
        Ok(Self { conn })
    }

    fn key(id: &str) -> String {
        format!("{KEY_PREFIX}{id}")
    }
}

#[async_trait]
impl TaskTable for RedisTable {
    async fn select_all(&self, order: SortOrder) -> Result<Vec<Task>> {
        let mut conn = self.conn.clone();
        let keys: Vec<String> = conn.keys(format!("{KEY_PREFIX}*")).await?;
        debug!(rows = keys.len(), "scanning tasks");

        let mut tasks = Vec::with_capacity(keys.len());
        for key in keys {
            // a row may disappear between KEYS and GET
            let Some(json) = conn.get::<_, Option<String>>(&key).await? else {
                continue;
            };
            match serde_json::from_str::<Task>(&json) {
                Ok(task) => tasks.push(task),
                Err(err) => warn!(%key, error = %err, "skipping unreadable row"),
            }
        }
        order.sort(&mut tasks);
        Ok(tasks)
    }

    async fn get(&self, id: &str) -> Result<Task> {
        let mut conn = self.conn.clone();
        let json: Option<String> = conn.get(Self::key(id)).await?;
        let json = json.ok_or_else(|| ApiError::NotFound(id.to_string()))?;
        Ok(serde_json::from_str(&json)?)
    }

    async fn insert(&self, task: Task) -> Result<Task> {
        let mut conn = self.conn.clone();
        let json = serde_json::to_string(&task)?;
        let created: bool = conn.set_nx(Self::key(&task.id), json).await?;
        if !created {
            return Err(ApiError::Conflict(task.id));
        }
        Ok(task)
    }

    async fn update(&self, id: &str, fields: TaskFields) -> Result<Task> {
        let mut task = self.get(id).await?;
        task.apply_fields(fields);

        let mut conn = self.conn.clone();
        let json = serde_json::to_string(&task)?;
        conn.set::<_, _, ()>(Self::key(id), json).await?;
        Ok(task)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        let removed: usize = conn.del(Self::key(id)).await?;
        if removed == 0 {
            return Err(ApiError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
