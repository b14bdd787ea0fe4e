//! Row CRUD over the remote `tasks` table.
//!
//! Every call either fully succeeds or returns an error; there are no partial
//! writes to reconcile.

mod http;
mod memory;

use std::fmt;

use async_trait::async_trait;
use shared::{SortOrder, Task, TaskFields};
use thiserror::Error;

pub use http::HttpRemoteStore;
pub use memory::MemoryRemoteStore;

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("remote store answered {status}: {message}")]
    Status { status: u16, message: String },

    #[error("task {0} does not exist in the remote table")]
    NotFound(String),

    #[error("task {0} already exists in the remote table")]
    Conflict(String),

    #[error("remote store unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, RemoteError>;

/// The four calls the board makes against the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteOp {
    Select,
    Insert,
    Update,
    Delete,
}

impl fmt::Display for RemoteOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RemoteOp::Select => "select",
            RemoteOp::Insert => "insert",
            RemoteOp::Update => "update",
            RemoteOp::Delete => "delete",
        })
    }
}

#[async_trait]
pub trait RemoteStore: Send + Sync {
    async fn select_all(&self, order: SortOrder) -> Result<Vec<Task>>;

    async fn insert(&self, task: &Task) -> Result<()>;

    async fn update(&self, id: &str, fields: &TaskFields) -> Result<()>;

    async fn delete(&self, id: &str) -> Result<()>;
}
