use crate::adapter::{StatePersistence, StoreAdapter};
use crate::cli::{Command, ConfigAction, ModeSwitch};
use crate::clock::Clock;
use crate::config::{ConfigError, ConfigManager};
use crate::controller::TaskListController;
use crate::export::{export_to, ClipboardSink, SystemClipboard};
use crate::i18n::labels_for;
use crate::models::{LanguageCode, Task};
use crate::status::StatusBoard;
use crate::storage::{create_store, StorageError};
use chrono::{NaiveDate, NaiveTime};
use std::io::Write;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("No task with id {0}")]
    TaskNotFound(i64),
}

/// Everything a command needs besides the controller.
pub struct Session<'a> {
    pub status: StatusBoard,
    pub clipboard: &'a mut dyn ClipboardSink,
}

/// Runs one command against the store named by the config.
pub fn dispatch<W: Write>(
    command: Command,
    manager: &mut ConfigManager,
    out: &mut W,
) -> Result<(), CommandError> {
    if let Command::Config { action } = command {
        return run_config(manager, action, out);
    }

    let config = manager.config();
    let store = create_store(config.storage_type(), &config.storage_path()?)?;
    let mut controller = TaskListController::new(StoreAdapter::new(store));
    let mut clipboard = SystemClipboard;
    let mut session = Session {
        status: StatusBoard::default(),
        clipboard: &mut clipboard,
    };
    execute(command, &mut controller, &mut session, out)
}

pub fn execute<P, C, W>(
    command: Command,
    controller: &mut TaskListController<P, C>,
    session: &mut Session<'_>,
    out: &mut W,
) -> Result<(), CommandError>
where
    P: StatePersistence,
    C: Clock,
    W: Write,
{
    let labels = labels_for(controller.language());

    match command {
        Command::Add { text, date, time } => {
            if let Some(ref date) = date {
                validate_due_date(date)?;
            }
            if let Some(ref time) = time {
                validate_due_time(time)?;
            }
            match controller.add_task(&text, date.as_deref(), time.as_deref())? {
                Some(id) => writeln!(out, "Added task {}", id)?,
                None => {
                    return Err(CommandError::InvalidInput(
                        "Task text cannot be empty".to_string(),
                    ))
                }
            }
        }
        Command::List => {
            writeln!(out, "📝 {}", labels.title)?;
            if controller.tasks().is_empty() {
                writeln!(out, "{}", labels.no_tasks)?;
            }
            for task in controller.tasks() {
                write_task(out, task, labels)?;
            }
        }
        Command::Toggle { id } => {
            if !controller.toggle_task(id)? {
                return Err(CommandError::TaskNotFound(id));
            }
            let done = controller.task(id).map(|t| t.completed).unwrap_or(false);
            writeln!(out, "Task {} marked {}", id, if done { "done" } else { "not done" })?;
        }
        Command::Delete { id } => {
            let text = controller.task(id).map(|t| t.text.clone());
            if !controller.delete_task(id)? {
                return Err(CommandError::TaskNotFound(id));
            }
            writeln!(out, "{} {}", labels.delete_task, text.unwrap_or_default())?;
        }
        Command::ClearCompleted => {
            let removed = controller.clear_completed()?;
            writeln!(out, "Removed {} completed task(s)", removed)?;
        }
        Command::Export { stdout } => {
            let text = controller.export_as_text();
            if stdout {
                writeln!(out, "{}", text)?;
            } else {
                let message = export_to(session.clipboard, &text, labels);
                session.status.show(message, controller.clock().now());
                if let Some(message) = session.status.current() {
                    writeln!(out, "{}", message)?;
                }
            }
        }
        Command::DarkMode { mode } => {
            let flag = match mode {
                None => controller.dark_mode(),
                Some(ModeSwitch::On) => {
                    controller.set_dark_mode(true)?;
                    true
                }
                Some(ModeSwitch::Off) => {
                    controller.set_dark_mode(false)?;
                    false
                }
                Some(ModeSwitch::Toggle) => controller.toggle_dark_mode()?,
            };
            writeln!(out, "Dark mode: {}", if flag { "on" } else { "off" })?;
        }
        Command::Language { code } => {
            if let Some(code) = code {
                controller.set_language(LanguageCode::new(code))?;
            }
            writeln!(out, "{}", controller.language())?;
        }
        Command::Config { .. } => {
            return Err(CommandError::InvalidInput(
                "config commands do not need a task list".to_string(),
            ));
        }
    }

    Ok(())
}

fn write_task<W: Write>(
    out: &mut W,
    task: &Task,
    labels: &crate::i18n::Labels,
) -> Result<(), CommandError> {
    let marker = if task.completed { "[x]" } else { "[ ]" };
    writeln!(out, "{} {}  {}", marker, task.id, task.text)?;

    let mut due = Vec::new();
    if task.has_due_date() {
        due.push(format!("{} {}", labels.due_date, task.due_date));
    }
    if task.has_due_time() {
        due.push(format!("{} {}", labels.due_time, task.due_time));
    }
    if !due.is_empty() {
        writeln!(out, "    {}", due.join(" "))?;
    }
    Ok(())
}

fn run_config<W: Write>(
    manager: &mut ConfigManager,
    action: ConfigAction,
    out: &mut W,
) -> Result<(), CommandError> {
    match action {
        ConfigAction::Get { key } => {
            if !crate::config::KEYS.contains(&key.as_str()) {
                return Err(ConfigError::InvalidKey(key).into());
            }
            writeln!(out, "{}", manager.get(&key).unwrap_or_else(|| "null".to_string()))?;
        }
        ConfigAction::Set { key, value } => {
            manager.set(&key, &value)?;
            writeln!(out, "{} = {}", key, value)?;
        }
        ConfigAction::Unset { key } => {
            manager.unset(&key)?;
            writeln!(out, "{} unset", key)?;
        }
        ConfigAction::List => {
            for (key, value, is_default) in manager.list() {
                let suffix = if is_default { " (default)" } else { "" };
                writeln!(out, "{} = {}{}", key, value, suffix)?;
            }
        }
    }
    Ok(())
}

fn validate_due_date(date: &str) -> Result<(), CommandError> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| CommandError::InvalidInput(format!("Due date must be YYYY-MM-DD: {}", date)))
}

fn validate_due_time(time: &str) -> Result<(), CommandError> {
    NaiveTime::parse_from_str(time, "%H:%M")
        .map(|_| ())
        .map_err(|_| CommandError::InvalidInput(format!("Due time must be HH:MM: {}", time)))
}
