use std::io::{self, Write};

use shared::{Subtask, Task};
use tracing::warn;

use crate::history::HistoryState;
use crate::view::{short_id, BoardView};

/// Display sink. Both calls are idempotent and may run after every change.
pub trait Renderer: Send {
    fn render_board(&mut self, tasks: &[Task]);

    /// Undo/redo affordances.
    fn render_history(&mut self, _state: HistoryState) {}
}

/// Plain-text board written to any `io::Write`.
pub struct TerminalRenderer<W> {
    out: W,
}

impl TerminalRenderer<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_board(&mut self, tasks: &[Task]) -> io::Result<()> {
        let view = BoardView::build(tasks);
        for column in &view.columns {
            writeln!(
                self.out,
                "{} ({})",
                column.status.label().to_uppercase(),
                column.count()
            )?;
            if column.cards.is_empty() {
                writeln!(self.out, "  -")?;
            }
            for card in &column.cards {
                let task = card.task;
                write!(self.out, "  {}  {}", short_id(&task.id), task.title)?;
                if card.progress.total > 0 {
                    write!(
                        self.out,
                        "  [{} of {} steps, {}%]",
                        card.progress.done,
                        card.progress.total,
                        card.progress.percent()
                    )?;
                }
                writeln!(self.out, "  {}", card.created_on())?;
                if !task.description.is_empty() {
                    writeln!(self.out, "      {}", task.description)?;
                }
                self.write_subtasks(&task.subtasks, 3)?;
            }
        }
        self.out.flush()
    }

    fn write_subtasks(&mut self, subtasks: &[Subtask], depth: usize) -> io::Result<()> {
        for subtask in subtasks {
            writeln!(
                self.out,
                "{:indent$}[{}] {}  #{}",
                "",
                if subtask.completed { 'x' } else { ' ' },
                subtask.text,
                short_id(&subtask.id),
                indent = depth * 2
            )?;
            self.write_subtasks(&subtask.subtasks, depth + 1)?;
        }
        Ok(())
    }
}

impl<W: Write + Send> Renderer for TerminalRenderer<W> {
    fn render_board(&mut self, tasks: &[Task]) {
        if let Err(err) = self.write_board(tasks) {
            warn!(error = %err, "failed to draw board");
        }
    }

    fn render_history(&mut self, state: HistoryState) {
        let line = format!(
            "undo: {} ({})  redo: {} ({})",
            if state.can_undo { "on" } else { "off" },
            state.undo_len,
            if state.can_redo { "on" } else { "off" },
            state.redo_len
        );
        if let Err(err) = writeln!(self.out, "{line}") {
            warn!(error = %err, "failed to draw history state");
        }
    }
}
