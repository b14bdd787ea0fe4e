//! Shared fixtures for the board integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use board::{HistoryState, MemoryRemoteStore, Renderer, TaskStore, ToastQueue};
use parking_lot::Mutex;
use shared::{Task, TaskStatus};

#[derive(Debug, Default)]
struct Frames {
    boards: usize,
    last_board: Vec<Task>,
    last_history: Option<HistoryState>,
}

/// Renderer that remembers what it was asked to draw.
#[derive(Debug, Clone, Default)]
pub struct RenderLog {
    frames: Arc<Mutex<Frames>>,
}

impl RenderLog {
    pub fn boards(&self) -> usize {
        self.frames.lock().boards
    }

    pub fn last_board(&self) -> Vec<Task> {
        self.frames.lock().last_board.clone()
    }

    pub fn last_history(&self) -> Option<HistoryState> {
        self.frames.lock().last_history
    }
}

impl Renderer for RenderLog {
    fn render_board(&mut self, tasks: &[Task]) {
        let mut frames = self.frames.lock();
        frames.boards += 1;
        frames.last_board = tasks.to_vec();
    }

    fn render_history(&mut self, state: HistoryState) {
        self.frames.lock().last_history = Some(state);
    }
}

pub struct Harness {
    pub store: TaskStore,
    pub remote: Arc<MemoryRemoteStore>,
    pub toasts: ToastQueue,
    pub renders: RenderLog,
}

pub fn harness() -> Harness {
    harness_with(Vec::new())
}

pub fn harness_with(rows: Vec<Task>) -> Harness {
    let remote = Arc::new(MemoryRemoteStore::with_rows(rows));
    let toasts = ToastQueue::new();
    let renders = RenderLog::default();
    let store = TaskStore::new(remote.clone(), renders.clone(), toasts.clone());
    Harness {
        store,
        remote,
        toasts,
        renders,
    }
}

pub fn row(title: &str, status: TaskStatus, created_at: i64) -> Task {
    let mut task = Task::new(title, format!("{title} description"), status);
    task.created_at = created_at;
    task
}

pub fn titles(tasks: &[Task]) -> Vec<&str> {
    tasks.iter().map(|task| task.title.as_str()).collect()
}
