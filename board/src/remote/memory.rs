use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use shared::{SortOrder, Task, TaskFields};

use super::{RemoteError, RemoteOp, RemoteStore, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Failure {
    Once,
    Always,
}

#[derive(Debug, Default)]
struct Inner {
    rows: Vec<Task>,
    failures: HashMap<RemoteOp, Failure>,
    calls: HashMap<RemoteOp, usize>,
}

impl Inner {
    fn enter(&mut self, op: RemoteOp) -> Result<()> {
        *self.calls.entry(op).or_default() += 1;
        match self.failures.get(&op).copied() {
            Some(Failure::Once) => {
                self.failures.remove(&op);
                Err(RemoteError::Unavailable(format!("injected {op} failure")))
            }
            Some(Failure::Always) => Err(RemoteError::Unavailable(format!("injected {op} failure"))),
            None => Ok(()),
        }
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.rows.iter().position(|row| row.id == id)
    }
}

/// In-process `tasks` table with the same semantics as the backend service,
/// plus failure injection per operation.
#[derive(Debug, Default)]
pub struct MemoryRemoteStore {
    inner: Mutex<Inner>,
}

impl MemoryRemoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<Task>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                rows,
                ..Inner::default()
            }),
        }
    }

    /// Rows in insertion order.
    pub fn rows(&self) -> Vec<Task> {
        self.inner.lock().rows.clone()
    }

    pub fn row(&self, id: &str) -> Option<Task> {
        let inner = self.inner.lock();
        inner.position(id).map(|index| inner.rows[index].clone())
    }

    /// Makes every following call of `op` fail until [`recover`](Self::recover).
    pub fn fail(&self, op: RemoteOp) {
        self.inner.lock().failures.insert(op, Failure::Always);
    }

    /// Makes only the next call of `op` fail.
    pub fn fail_once(&self, op: RemoteOp) {
        self.inner.lock().failures.insert(op, Failure::Once);
    }

    pub fn recover(&self) {
        self.inner.lock().failures.clear();
    }

    /// Number of calls of `op` received so far, failed ones included.
    pub fn calls(&self, op: RemoteOp) -> usize {
        self.inner.lock().calls.get(&op).copied().unwrap_or(0)
    }
}

#[async_trait]
impl RemoteStore for MemoryRemoteStore {
    async fn select_all(&self, order: SortOrder) -> Result<Vec<Task>> {
        let mut inner = self.inner.lock();
        inner.enter(RemoteOp::Select)?;
        let mut rows = inner.rows.clone();
        order.sort(&mut rows);
        Ok(rows)
    }

    async fn insert(&self, task: &Task) -> Result<()> {
        let mut inner = self.inner.lock();
        inner.enter(RemoteOp::Insert)?;
        if inner.position(&task.id).is_some() {
            return Err(RemoteError::Conflict(task.id.clone()));
        }
        inner.rows.push(task.clone());
        Ok(())
    }

    async fn update(&self, id: &str, fields: &TaskFields) -> Result<()> {
        let mut inner = self.inner.lock();
        inner.enter(RemoteOp::Update)?;
        let index = inner
            .position(id)
            .ok_or_else(|| RemoteError::NotFound(id.to_string()))?;
        inner.rows[index].apply_fields(fields.clone());
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut inner = self.inner.lock();
        inner.enter(RemoteOp::Delete)?;
        let index = inner
            .position(id)
            .ok_or_else(|| RemoteError::NotFound(id.to_string()))?;
        inner.rows.remove(index);
        Ok(())
    }
}
