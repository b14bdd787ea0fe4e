use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use shared::{SortOrder, Task, TaskFields};
use tracing::debug;

use super::{RemoteError, RemoteStore, Result};
use crate::config::ClientConfig;

/// REST client for the `backend` table service.
#[derive(Debug, Clone)]
pub struct HttpRemoteStore {
    client: Client,
    table_url: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl HttpRemoteStore {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            client,
            table_url: config.table_url(),
        })
    }

    fn row_url(&self, id: &str) -> String {
        format!("{}/{}", self.table_url, id)
    }

    async fn check(response: Response, id: &str) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        match status {
            StatusCode::NOT_FOUND => Err(RemoteError::NotFound(id.to_string())),
            StatusCode::CONFLICT => Err(RemoteError::Conflict(id.to_string())),
            _ => {
                let text = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ErrorBody>(&text)
                    .map(|body| body.error)
                    .unwrap_or(text);
                Err(RemoteError::Status {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }
}

#[async_trait]
impl RemoteStore for HttpRemoteStore {
    async fn select_all(&self, order: SortOrder) -> Result<Vec<Task>> {
        let url = format!("{}?order={}", self.table_url, order.as_query());
        debug!(%url, "GET tasks");
        let response = self.client.get(&url).send().await?;
        let response = Self::check(response, "*").await?;
        Ok(response.json().await?)
    }

    async fn insert(&self, task: &Task) -> Result<()> {
        debug!(task_id = %task.id, "POST task");
        let response = self.client.post(&self.table_url).json(task).send().await?;
        Self::check(response, &task.id).await?;
        Ok(())
    }

    async fn update(&self, id: &str, fields: &TaskFields) -> Result<()> {
        debug!(task_id = %id, "PUT task");
        let response = self.client.put(self.row_url(id)).json(fields).send().await?;
        Self::check(response, id).await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        debug!(task_id = %id, "DELETE task");
        let response = self.client.delete(self.row_url(id)).send().await?;
        Self::check(response, id).await?;
        Ok(())
    }
}
