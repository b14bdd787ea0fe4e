//! Client side of the Kanban board: the task store, its undo/redo history
//! and the remote table it mirrors.

pub mod action;
pub mod command;
pub mod config;
pub mod containers;
pub mod error;
pub mod history;
pub mod notify;
pub mod remote;
pub mod render;
pub mod store;
pub mod subtree;
pub mod view;

pub use action::{Action, ActionKind};
pub use config::ClientConfig;
pub use error::{BoardError, Result};
pub use history::{ActionLog, Direction, HistoryState};
pub use notify::{Notification, Notifier, Severity, ToastQueue};
pub use remote::{HttpRemoteStore, MemoryRemoteStore, RemoteError, RemoteOp, RemoteStore};
pub use render::{Renderer, TerminalRenderer};
pub use store::TaskStore;
