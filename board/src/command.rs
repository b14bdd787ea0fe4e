//! Line commands understood by the terminal board.

use std::str::FromStr;

use shared::{Subtask, Task, TaskStatus};
use thiserror::Error;

pub const HELP: &str = "\
commands:
  list                              redraw the board
  create <status> <title> [| desc]  new task (status: pending, in-progress, completed)
  edit <task> <title> [| desc]      change title and optionally description
  status <task> <status>            move a task to another column
  delete <task>                     delete a task
  sub <task> <text>                 add a subtask
  subin <task> <subtask> <text>     add a subtask under another subtask
  toggle <task> <subtask>           flip a subtask's completion
  rmsub <task> <subtask>            remove a subtask and its children
  undo | redo                       walk the history
  reload                            fetch everything again
  help | quit
ids may be given as the short form shown on the board";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Create {
        status: TaskStatus,
        title: String,
        description: String,
    },
    Edit {
        task: String,
        title: String,
        description: Option<String>,
    },
    Status {
        task: String,
        status: TaskStatus,
    },
    Delete {
        task: String,
    },
    AddSubtask {
        task: String,
        parent: Option<String>,
        text: String,
    },
    Toggle {
        task: String,
        subtask: String,
    },
    RemoveSubtask {
        task: String,
        subtask: String,
    },
    Undo,
    Redo,
    Reload,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command {0:?}, type help for the list")]
    Unknown(String),
    #[error("{command}: missing {what}")]
    Missing {
        command: &'static str,
        what: &'static str,
    },
    #[error("{0}")]
    Status(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (verb, rest) = split_word(line).ok_or(CommandError::Empty)?;
        let command = match verb.to_ascii_lowercase().as_str() {
            "list" | "ls" => Command::List,
            "create" | "new" => {
                let (status, rest) = word(rest, "create", "status")?;
                let (title, description) = title_and_description(rest);
                Command::Create {
                    status: parse_status(status)?,
                    title: required(title, "create", "title")?,
                    description: description.unwrap_or_default(),
                }
            }
            "edit" => {
                let (task, rest) = word(rest, "edit", "task id")?;
                let (title, description) = title_and_description(rest);
                Command::Edit {
                    task: task.to_string(),
                    title: required(title, "edit", "title")?,
                    description,
                }
            }
            "status" | "move" => {
                let (task, rest) = word(rest, "status", "task id")?;
                let (status, _) = word(rest, "status", "status")?;
                Command::Status {
                    task: task.to_string(),
                    status: parse_status(status)?,
                }
            }
            "delete" | "rm" => {
                let (task, _) = word(rest, "delete", "task id")?;
                Command::Delete {
                    task: task.to_string(),
                }
            }
            "sub" => {
                let (task, rest) = word(rest, "sub", "task id")?;
                Command::AddSubtask {
                    task: task.to_string(),
                    parent: None,
                    text: required(rest.to_string(), "sub", "text")?,
                }
            }
            "subin" => {
                let (task, rest) = word(rest, "subin", "task id")?;
                let (parent, rest) = word(rest, "subin", "parent subtask id")?;
                Command::AddSubtask {
                    task: task.to_string(),
                    parent: Some(parent.to_string()),
                    text: required(rest.to_string(), "subin", "text")?,
                }
            }
            "toggle" => {
                let (task, rest) = word(rest, "toggle", "task id")?;
                let (subtask, _) = word(rest, "toggle", "subtask id")?;
                Command::Toggle {
                    task: task.to_string(),
                    subtask: subtask.to_string(),
                }
            }
            "rmsub" => {
                let (task, rest) = word(rest, "rmsub", "task id")?;
                let (subtask, _) = word(rest, "rmsub", "subtask id")?;
                Command::RemoveSubtask {
                    task: task.to_string(),
                    subtask: subtask.to_string(),
                }
            }
            "undo" => Command::Undo,
            "redo" => Command::Redo,
            "reload" => Command::Reload,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

/// Full id of the task matching `token` exactly or by a unique suffix.
pub fn resolve_task<'a>(tasks: &'a [Task], token: &str) -> Option<&'a str> {
    let ids: Vec<&str> = tasks.iter().map(|task| task.id.as_str()).collect();
    resolve(&ids, token)
}

/// Same as [`resolve_task`], over every subtask of `task` at any depth.
pub fn resolve_subtask<'a>(task: &'a Task, token: &str) -> Option<&'a str> {
    let mut ids = Vec::new();
    collect_ids(&task.subtasks, &mut ids);
    resolve(&ids, token)
}

fn resolve<'a>(ids: &[&'a str], token: &str) -> Option<&'a str> {
    let token = token.trim_start_matches('#');
    if let Some(id) = ids.iter().find(|id| **id == token) {
        return Some(*id);
    }
    let mut matches = ids.iter().filter(|id| id.ends_with(token));
    match (matches.next(), matches.next()) {
        (Some(id), None) => Some(*id),
        _ => None,
    }
}

fn collect_ids<'a>(nodes: &'a [Subtask], ids: &mut Vec<&'a str>) {
    for node in nodes {
        ids.push(&node.id);
        collect_ids(&node.subtasks, ids);
    }
}

fn split_word(input: &str) -> Option<(&str, &str)> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    match input.split_once(char::is_whitespace) {
        Some((head, tail)) => Some((head, tail.trim_start())),
        None => Some((input, "")),
    }
}

fn word<'a>(
    input: &'a str,
    command: &'static str,
    what: &'static str,
) -> Result<(&'a str, &'a str), CommandError> {
    split_word(input).ok_or(CommandError::Missing { command, what })
}

fn required(value: String, command: &'static str, what: &'static str) -> Result<String, CommandError> {
    if value.trim().is_empty() {
        return Err(CommandError::Missing { command, what });
    }
    Ok(value)
}

fn title_and_description(input: &str) -> (String, Option<String>) {
    match input.split_once('|') {
        Some((title, description)) => (
            title.trim().to_string(),
            Some(description.trim().to_string()),
        ),
        None => (input.trim().to_string(), None),
    }
}

fn parse_status(value: &str) -> Result<TaskStatus, CommandError> {
    value.parse::<TaskStatus>().map_err(CommandError::Status)
}
