use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

pub type TaskList = Vec<Task>;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub text: String,
    pub completed: bool,
    #[serde(default)]
    pub due_date: String,
    #[serde(default)]
    pub due_time: String,
}

impl Task {
    /// Builds an open task from raw input. The text is trimmed and must not
    /// be empty afterwards.
    pub fn new(id: i64, text: &str, due_date: &str, due_time: &str) -> Result<Self, TaskError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TaskError::EmptyText);
        }

        Ok(Self {
            id,
            text: text.to_string(),
            completed: false,
            due_date: due_date.to_string(),
            due_time: due_time.to_string(),
        })
    }

    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }

    pub fn has_due_date(&self) -> bool {
        !self.due_date.is_empty()
    }

    pub fn has_due_time(&self) -> bool {
        !self.due_time.is_empty()
    }

    /// Renders the task as one export line, e.g.
    /// `[ ] Buy milk (Due: 2024-05-01 at 14:30)`.
    pub fn export_line(&self) -> String {
        let marker = if self.completed { "[x]" } else { "[ ]" };
        let mut line = format!("{} {}", marker, self.text);
        if self.has_due_date() {
            line.push_str(&format!(" (Due: {}", self.due_date));
            if self.has_due_time() {
                line.push_str(&format!(" at {}", self.due_time));
            }
            line.push(')');
        }
        line
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaskError {
    #[error("Task text cannot be empty")]
    EmptyText,
    #[error("Duplicate task id: {0}")]
    DuplicateId(i64),
}

/// Rejects lists where two tasks share an id.
pub fn validate_tasks(tasks: &[Task]) -> Result<(), TaskError> {
    let mut ids = HashSet::new();
    for task in tasks {
        if !ids.insert(task.id) {
            return Err(TaskError::DuplicateId(task.id));
        }
    }
    Ok(())
}

pub const DEFAULT_LANGUAGE: &str = "en";

/// A language code as stored. Codes outside the known set are kept as-is;
/// resolving them to a label table is up to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageCode(String);

impl LanguageCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for LanguageCode {
    fn default() -> Self {
        Self(DEFAULT_LANGUAGE.to_string())
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LanguageCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppSettings {
    pub dark_mode: bool,
    pub language: LanguageCode,
}
