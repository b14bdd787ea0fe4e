//! The task store: the authoritative task list and its mirroring policy.
//!
//! Every mutation writes to the remote table first and touches local state
//! only once the write is confirmed. Create, update and delete record an
//! [`Action`] after that confirmation; subtask edits are not undoable and
//! fall back to a full reload when their write fails.

use std::sync::Arc;

use shared::{validate_title, SortOrder, Subtask, Task, TaskFields, TaskPatch, TaskStatus};
use tracing::{debug, info, warn};

use crate::action::{Action, ActionKind};
use crate::containers::TaskMirrors;
use crate::error::{BoardError, Result};
use crate::history::{ActionLog, Direction, HistoryState};
use crate::notify::{Notification, Notifier};
use crate::remote::{RemoteOp, RemoteStore};
use crate::render::Renderer;
use crate::subtree;

pub struct TaskStore {
    remote: Arc<dyn RemoteStore>,
    renderer: Box<dyn Renderer>,
    notifier: Box<dyn Notifier>,
    tasks: Vec<Task>,
    mirrors: TaskMirrors,
    history: ActionLog,
}

impl TaskStore {
    pub fn new(
        remote: Arc<dyn RemoteStore>,
        renderer: impl Renderer + 'static,
        notifier: impl Notifier + 'static,
    ) -> Self {
        Self {
            remote,
            renderer: Box::new(renderer),
            notifier: Box::new(notifier),
            tasks: Vec::new(),
            mirrors: TaskMirrors::default(),
            history: ActionLog::new(),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn history(&self) -> &ActionLog {
        &self.history
    }

    pub fn history_state(&self) -> HistoryState {
        self.history.state()
    }

    pub fn mirrors(&self) -> &TaskMirrors {
        &self.mirrors
    }

    /// Draws the current list and history state again.
    pub fn redraw(&mut self) {
        self.renderer.render_board(&self.tasks);
        self.renderer.render_history(self.history.state());
    }

    /// Replaces the local list with the whole table, newest first. On
    /// failure the current list is kept as is.
    pub async fn load(&mut self) -> Result<usize> {
        debug!("loading tasks");
        match self.remote.select_all(SortOrder::NewestFirst).await {
            Ok(rows) => {
                let count = rows.len();
                self.tasks = rows;
                self.refresh();
                info!(count, "tasks loaded");
                self.notifier
                    .notify(Notification::success(format!("Loaded {count} tasks")));
                Ok(count)
            }
            Err(source) => Err(self.fail(BoardError::RemoteRead(source))),
        }
    }

    pub async fn create(
        &mut self,
        title: &str,
        description: &str,
        status: TaskStatus,
    ) -> Result<Task> {
        if let Err(err) = validate_title(title) {
            return Err(self.fail(err.into()));
        }
        let task = Task::new(title.trim(), description, status);

        if let Err(source) = self.remote.insert(&task).await {
            return Err(self.fail(BoardError::write(RemoteOp::Insert, source)));
        }

        self.tasks.push(task.clone());
        self.history.record(Action::Add { task: task.clone() });
        self.refresh();
        info!(task_id = %task.id, "task created");
        self.notifier
            .notify(Notification::success(format!("Task \"{}\" created", task.title)));
        Ok(task)
    }

    pub async fn update(&mut self, id: &str, patch: TaskPatch) -> Result<Task> {
        let index = self.require(id)?;
        if let Err(err) = patch.validate() {
            return Err(self.fail(err.into()));
        }

        let fields = TaskFields::from(patch.clone());
        if let Err(source) = self.remote.update(id, &fields).await {
            return Err(self.fail(BoardError::write(RemoteOp::Update, source)));
        }

        let before = self.tasks[index].clone();
        self.tasks[index].apply_patch(&patch);
        let updated = self.tasks[index].clone();
        self.history.record(Action::Update { task: before });
        self.refresh();
        info!(task_id = %id, "task updated");
        self.notifier.notify(Notification::info("Task updated"));
        Ok(updated)
    }

    pub async fn delete(&mut self, id: &str) -> Result<Task> {
        let index = self.require(id)?;

        if let Err(source) = self.remote.delete(id).await {
            return Err(self.fail(BoardError::write(RemoteOp::Delete, source)));
        }

        let task = self.tasks.remove(index);
        self.history.record(Action::Delete {
            task: task.clone(),
            index,
        });
        self.refresh();
        info!(task_id = %id, "task deleted");
        self.notifier.notify(Notification::info("Task deleted"));
        Ok(task)
    }

    /// Adds a subtask at the top level of the task, or under `parent_id`.
    pub async fn add_subtask(
        &mut self,
        task_id: &str,
        text: &str,
        parent_id: Option<&str>,
    ) -> Result<Subtask> {
        let index = self.require(task_id)?;
        let subtask = Subtask::new(text.trim());
        let current = &self.tasks[index].subtasks;
        let updated = match parent_id {
            None => {
                let mut updated = current.clone();
                updated.push(subtask.clone());
                Some(updated)
            }
            Some(parent_id) => subtree::append_child(current, parent_id, subtask.clone()),
        };
        let Some(updated) = updated else {
            return Err(self.fail(BoardError::SubtaskNotFound {
                task_id: task_id.to_string(),
                subtask_id: parent_id.unwrap_or_default().to_string(),
            }));
        };

        self.write_subtasks(index, updated, "Subtask added").await?;
        Ok(subtask)
    }

    /// Flips a subtask's completion. Returns the new value.
    pub async fn toggle_subtask(&mut self, task_id: &str, subtask_id: &str) -> Result<bool> {
        let index = self.require(task_id)?;
        let Some(updated) = subtree::toggle(&self.tasks[index].subtasks, subtask_id) else {
            return Err(self.fail(BoardError::SubtaskNotFound {
                task_id: task_id.to_string(),
                subtask_id: subtask_id.to_string(),
            }));
        };
        let completed = subtree::find(&updated, subtask_id).is_some_and(|s| s.completed);

        self.write_subtasks(index, updated, "Subtask status changed")
            .await?;
        Ok(completed)
    }

    /// Removes a subtask and everything nested under it.
    pub async fn remove_subtask(&mut self, task_id: &str, subtask_id: &str) -> Result<()> {
        let index = self.require(task_id)?;
        let Some(updated) = subtree::remove(&self.tasks[index].subtasks, subtask_id) else {
            return Err(self.fail(BoardError::SubtaskNotFound {
                task_id: task_id.to_string(),
                subtask_id: subtask_id.to_string(),
            }));
        };

        self.write_subtasks(index, updated, "Subtask removed").await
    }

    /// Reverts the most recent action. `Ok(None)` when there is nothing to undo.
    pub async fn undo(&mut self) -> Result<Option<ActionKind>> {
        self.replay(Direction::Undo).await
    }

    /// Re-applies the most recently undone action. `Ok(None)` when there is
    /// nothing to redo.
    pub async fn redo(&mut self) -> Result<Option<ActionKind>> {
        self.replay(Direction::Redo).await
    }

    async fn replay(&mut self, direction: Direction) -> Result<Option<ActionKind>> {
        let Some(action) = self.history.pop(direction) else {
            self.notifier
                .notify(Notification::info(format!("Nothing to {direction}")));
            return Ok(None);
        };
        let kind = action.kind();
        debug!(%direction, %kind, task_id = %action.task_id(), "replaying action");

        match self.revert(&action).await {
            Ok(inverse) => {
                self.history.push_inverse(direction, inverse);
                self.refresh();
                info!(%direction, %kind, "history step applied");
                self.notifier
                    .notify(Notification::info(format!("{direction} {kind} done")));
                Ok(Some(kind))
            }
            Err(err @ BoardError::StaleAction(_)) => {
                self.renderer.render_history(self.history.state());
                Err(self.fail(err))
            }
            Err(err) => {
                self.history.restore(direction, action);
                Err(self.fail(err))
            }
        }
    }

    /// Undoes the effect `action` describes and returns the action that
    /// would undo this reversal. Shared by undo and redo; local state is only
    /// touched after the remote write succeeds.
    async fn revert(&mut self, action: &Action) -> Result<Action> {
        match action {
            Action::Add { task } => {
                let index = self
                    .position(&task.id)
                    .ok_or_else(|| BoardError::StaleAction(task.id.clone()))?;
                self.remote
                    .delete(&task.id)
                    .await
                    .map_err(|source| BoardError::write(RemoteOp::Delete, source))?;
                let removed = self.tasks.remove(index);
                Ok(Action::Delete {
                    task: removed,
                    index,
                })
            }
            Action::Update { task: snapshot } => {
                let index = self
                    .position(&snapshot.id)
                    .ok_or_else(|| BoardError::StaleAction(snapshot.id.clone()))?;
                self.remote
                    .update(&snapshot.id, &TaskFields::from(snapshot))
                    .await
                    .map_err(|source| BoardError::write(RemoteOp::Update, source))?;
                let replaced = std::mem::replace(&mut self.tasks[index], snapshot.clone());
                Ok(Action::Update { task: replaced })
            }
            Action::Delete { task, index } => {
                if self.position(&task.id).is_some() {
                    return Err(BoardError::StaleAction(task.id.clone()));
                }
                self.remote
                    .insert(task)
                    .await
                    .map_err(|source| BoardError::write(RemoteOp::Insert, source))?;
                let at = (*index).min(self.tasks.len());
                self.tasks.insert(at, task.clone());
                Ok(Action::Add { task: task.clone() })
            }
        }
    }

    /// Persists the whole subtask tree of one task. A failed write reloads
    /// the table so the board shows what the remote side holds.
    async fn write_subtasks(
        &mut self,
        index: usize,
        subtasks: Vec<Subtask>,
        done: &str,
    ) -> Result<()> {
        let task_id = self.tasks[index].id.clone();
        let fields = TaskFields::subtasks(subtasks.clone());

        if let Err(source) = self.remote.update(&task_id, &fields).await {
            let err = self.fail(BoardError::write(RemoteOp::Update, source));
            if let Err(reload) = self.load().await {
                warn!(error = %reload, "reload after failed subtask write also failed");
            }
            return Err(err);
        }

        self.tasks[index].subtasks = subtasks;
        self.history.clear_redo();
        self.refresh();
        info!(task_id = %task_id, "subtasks saved");
        self.notifier.notify(Notification::success(done));
        Ok(())
    }

    /// Position of `id`, or a surfaced `NotFound`.
    fn require(&mut self, id: &str) -> Result<usize> {
        match self.position(id) {
            Some(index) => Ok(index),
            None => Err(self.fail(BoardError::NotFound(id.to_string()))),
        }
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == id)
    }

    /// Rebuilds the mirrors and redraws.
    fn refresh(&mut self) {
        self.mirrors = TaskMirrors::rebuild(&self.tasks);
        self.redraw();
    }

    /// Logs and surfaces an error, handing it back for the caller to return.
    fn fail(&mut self, err: BoardError) -> BoardError {
        warn!(error = %err, "board operation failed");
        self.notifier.notify(Notification::error(err.to_string()));
        err
    }
}
