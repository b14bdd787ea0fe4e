//! Undo and redo stacks.
//!
//! Actions flow between the two stacks: whatever is popped from one side is
//! either pushed back there (the compensating write failed) or its inverse is
//! pushed onto the other side.

use std::fmt;

use crate::action::Action;
use crate::containers::Stack;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Undo,
    Redo,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Undo => "undo",
            Direction::Redo => "redo",
        })
    }
}

/// Button state derived from the two stacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HistoryState {
    pub can_undo: bool,
    pub can_redo: bool,
    pub undo_len: usize,
    pub redo_len: usize,
}

#[derive(Debug, Default)]
pub struct ActionLog {
    undo: Stack<Action>,
    redo: Stack<Action>,
}

impl ActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a fresh user action. The redo history no longer applies once
    /// the timeline branches.
    pub fn record(&mut self, action: Action) {
        self.undo.push(action);
        self.redo.clear();
    }

    pub fn clear_redo(&mut self) {
        self.redo.clear();
    }

    pub fn pop(&mut self, direction: Direction) -> Option<Action> {
        self.source(direction).pop()
    }

    /// Puts a popped action back where it came from.
    pub fn restore(&mut self, direction: Direction, action: Action) {
        self.source(direction).push(action);
    }

    /// Pushes the inverse of a replayed action onto the opposite stack.
    pub fn push_inverse(&mut self, direction: Direction, inverse: Action) {
        match direction {
            Direction::Undo => self.redo.push(inverse),
            Direction::Redo => self.undo.push(inverse),
        }
    }

    pub fn peek_undo(&self) -> Option<&Action> {
        self.undo.peek()
    }

    pub fn peek_redo(&self) -> Option<&Action> {
        self.redo.peek()
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    pub fn state(&self) -> HistoryState {
        HistoryState {
            can_undo: !self.undo.is_empty(),
            can_redo: !self.redo.is_empty(),
            undo_len: self.undo.len(),
            redo_len: self.redo.len(),
        }
    }

    fn source(&mut self, direction: Direction) -> &mut Stack<Action> {
        match direction {
            Direction::Undo => &mut self.undo,
            Direction::Redo => &mut self.redo,
        }
    }
}
