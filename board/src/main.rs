use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use board::command::{resolve_subtask, resolve_task, Command, HELP};
use board::config::DEFAULT_API_URL;
use board::{ClientConfig, HttpRemoteStore, Severity, TaskStore, TerminalRenderer, ToastQueue};
use clap::Parser;
use shared::TaskPatch;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "board", about = "Kanban board over a remote tasks table")]
struct Args {
    /// Base URL of the tasks service
    #[arg(long, env = "TASKS_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Request timeout in seconds
    #[arg(long, env = "TASKS_API_TIMEOUT", default_value_t = 10)]
    timeout_secs: u64,

    /// Log filter, e.g. `info` or `board=debug`
    #[arg(long, env = "RUST_LOG", default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();
    init_tracing(&args.log_level)?;

    let config =
        ClientConfig::new(args.api_url).with_timeout(Duration::from_secs(args.timeout_secs));
    let remote = Arc::new(HttpRemoteStore::new(&config)?);
    let toasts = ToastQueue::new();
    let mut store = TaskStore::new(remote, TerminalRenderer::stdout(), toasts.clone());

    // a failed load has already been turned into a toast
    if let Err(err) = store.load().await {
        debug!(error = %err, "initial load failed");
    }
    print_toasts(&toasts);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    prompt();
    while let Some(line) = lines.next_line().await? {
        if !line.trim().is_empty() {
            match line.parse::<Command>() {
                Ok(Command::Quit) => break,
                Ok(command) => {
                    if let Err(err) = run(&mut store, command).await {
                        debug!(error = %err, "command failed");
                    }
                }
                Err(err) => println!("{err}"),
            }
            print_toasts(&toasts);
        }
        prompt();
    }
    Ok(())
}

async fn run(store: &mut TaskStore, command: Command) -> board::Result<()> {
    match command {
        Command::List => store.redraw(),
        Command::Help => println!("{HELP}"),
        Command::Create {
            status,
            title,
            description,
        } => {
            store.create(&title, &description, status).await?;
        }
        Command::Edit {
            task,
            title,
            description,
        } => {
            let id = task_id(store, &task);
            let mut patch = TaskPatch::default().title(title);
            if let Some(description) = description {
                patch = patch.description(description);
            }
            store.update(&id, patch).await?;
        }
        Command::Status { task, status } => {
            let id = task_id(store, &task);
            store.update(&id, TaskPatch::default().status(status)).await?;
        }
        Command::Delete { task } => {
            let id = task_id(store, &task);
            store.delete(&id).await?;
        }
        Command::AddSubtask { task, parent, text } => {
            let id = task_id(store, &task);
            let parent = parent.map(|parent| subtask_id(store, &id, &parent));
            store.add_subtask(&id, &text, parent.as_deref()).await?;
        }
        Command::Toggle { task, subtask } => {
            let id = task_id(store, &task);
            let subtask = subtask_id(store, &id, &subtask);
            store.toggle_subtask(&id, &subtask).await?;
        }
        Command::RemoveSubtask { task, subtask } => {
            let id = task_id(store, &task);
            let subtask = subtask_id(store, &id, &subtask);
            store.remove_subtask(&id, &subtask).await?;
        }
        Command::Undo => {
            store.undo().await?;
        }
        Command::Redo => {
            store.redo().await?;
        }
        Command::Reload => {
            store.load().await?;
        }
        Command::Quit => {}
    }
    Ok(())
}

/// Expands a short id; unknown tokens pass through so the store reports them.
fn task_id(store: &TaskStore, token: &str) -> String {
    resolve_task(store.tasks(), token)
        .unwrap_or(token)
        .to_string()
}

fn subtask_id(store: &TaskStore, task_id: &str, token: &str) -> String {
    store
        .get(task_id)
        .and_then(|task| resolve_subtask(task, token))
        .unwrap_or(token)
        .to_string()
}

fn print_toasts(toasts: &ToastQueue) {
    for toast in toasts.drain() {
        let tag = match toast.severity {
            Severity::Info => "info",
            Severity::Success => "ok",
            Severity::Error => "error",
        };
        println!("[{tag}] {}", toast.message);
    }
}

fn prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}

fn init_tracing(log_level: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_new(log_level)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()?;
    Ok(())
}
