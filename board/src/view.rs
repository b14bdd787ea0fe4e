//! Three-column board layout, independent of any output device.

use chrono::DateTime;
use shared::{Subtask, Task, TaskStatus};

/// Characters of an id shown on screen and accepted as a shorthand.
pub const SHORT_ID_LEN: usize = 8;

/// Tail of an id. Ids are time-ordered, so the tail is the random part.
pub fn short_id(id: &str) -> &str {
    if !id.is_ascii() || id.len() <= SHORT_ID_LEN {
        return id;
    }
    &id[id.len() - SHORT_ID_LEN..]
}

/// Completed vs. total top-level subtasks of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    pub done: usize,
    pub total: usize,
}

impl Progress {
    pub fn of(subtasks: &[Subtask]) -> Self {
        Self {
            done: subtasks.iter().filter(|s| s.completed).count(),
            total: subtasks.len(),
        }
    }

    pub fn percent(&self) -> usize {
        if self.total == 0 {
            0
        } else {
            self.done * 100 / self.total
        }
    }
}

#[derive(Debug, Clone)]
pub struct Card<'a> {
    pub task: &'a Task,
    pub progress: Progress,
}

impl Card<'_> {
    pub fn created_on(&self) -> String {
        DateTime::from_timestamp_millis(self.task.created_at)
            .map(|at| at.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct Column<'a> {
    pub status: TaskStatus,
    pub cards: Vec<Card<'a>>,
}

impl Column<'_> {
    pub fn count(&self) -> usize {
        self.cards.len()
    }
}

#[derive(Debug, Clone)]
pub struct BoardView<'a> {
    pub columns: [Column<'a>; 3],
}

impl<'a> BoardView<'a> {
    /// Groups tasks by status, keeping store order inside each column.
    pub fn build(tasks: &'a [Task]) -> Self {
        let columns = TaskStatus::ALL.map(|status| Column {
            status,
            cards: tasks
                .iter()
                .filter(|task| task.status == status)
                .map(|task| Card {
                    task,
                    progress: Progress::of(&task.subtasks),
                })
                .collect(),
        });
        Self { columns }
    }

    pub fn column(&self, status: TaskStatus) -> &Column<'a> {
        match status {
            TaskStatus::Pending => &self.columns[0],
            TaskStatus::InProgress => &self.columns[1],
            TaskStatus::Completed => &self.columns[2],
        }
    }

    pub fn counts(&self) -> [usize; 3] {
        [
            self.columns[0].count(),
            self.columns[1].count(),
            self.columns[2].count(),
        ]
    }
}
