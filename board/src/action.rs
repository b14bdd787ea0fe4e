use std::fmt;

use shared::Task;

/// A recorded change to the task list.
///
/// Each variant owns its own copy of the task, taken when the action was
/// recorded; edits to the live task never reach it.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The task was inserted.
    Add { task: Task },
    /// The task was overwritten; `task` is the state before the overwrite.
    Update { task: Task },
    /// The task was removed from position `index`.
    Delete { task: Task, index: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Add,
    Update,
    Delete,
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Add { .. } => ActionKind::Add,
            Action::Update { .. } => ActionKind::Update,
            Action::Delete { .. } => ActionKind::Delete,
        }
    }

    pub fn task(&self) -> &Task {
        match self {
            Action::Add { task } | Action::Update { task } | Action::Delete { task, .. } => task,
        }
    }

    pub fn task_id(&self) -> &str {
        &self.task().id
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ActionKind::Add => "ADD",
            ActionKind::Update => "UPDATE",
            ActionKind::Delete => "DELETE",
        })
    }
}
