use shared::PatchError;
use thiserror::Error;

use crate::remote::{RemoteError, RemoteOp};

#[derive(Debug, Error)]
pub enum BoardError {
    /// Loading the table failed; the local list was left as it was.
    #[error("could not load tasks: {0}")]
    RemoteRead(#[source] RemoteError),

    #[error("remote {op} failed: {source}")]
    RemoteWrite {
        op: RemoteOp,
        #[source]
        source: RemoteError,
    },

    #[error("task {0} not found")]
    NotFound(String),

    #[error("subtask {subtask_id} not found in task {task_id}")]
    SubtaskNotFound { task_id: String, subtask_id: String },

    #[error("invalid change: {0}")]
    Invalid(#[from] PatchError),

    /// A history entry no longer matches the task list and was dropped.
    #[error("history entry for task {0} no longer matches the board")]
    StaleAction(String),
}

impl BoardError {
    pub fn write(op: RemoteOp, source: RemoteError) -> Self {
        BoardError::RemoteWrite { op, source }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            BoardError::NotFound(_) | BoardError::SubtaskNotFound { .. }
        )
    }

    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            BoardError::RemoteRead(_) | BoardError::RemoteWrite { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, BoardError>;
