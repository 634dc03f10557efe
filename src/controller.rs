use crate::adapter::StatePersistence;
use crate::clock::{Clock, SystemClock};
use crate::models::{AppSettings, LanguageCode, Task, TaskList};
use crate::storage::StorageError;
use std::collections::HashSet;

/// Owns the authoritative task list and settings.
///
/// State is read from persistence once, in [`TaskListController::load`].
/// Every mutation afterwards updates memory first and then writes the full
/// changed record back before returning.
pub struct TaskListController<P: StatePersistence, C: Clock = SystemClock> {
    persistence: P,
    clock: C,
    tasks: TaskList,
    settings: AppSettings,
    last_id: i64,
}

impl<P: StatePersistence> TaskListController<P> {
    pub fn new(persistence: P) -> Self {
        Self::load(persistence, SystemClock)
    }
}

impl<P: StatePersistence, C: Clock> TaskListController<P, C> {
    pub fn load(persistence: P, clock: C) -> Self {
        let tasks = persistence.load_tasks();
        let settings = AppSettings {
            dark_mode: persistence.load_dark_mode(),
            language: persistence.load_language(),
        };
        let last_id = tasks.iter().map(|t| t.id).max().unwrap_or(i64::MIN);
        log::debug!(
            "loaded {} tasks, dark_mode={}, language={}",
            tasks.len(),
            settings.dark_mode,
            settings.language
        );

        Self {
            persistence,
            clock,
            tasks,
            settings,
            last_id,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn dark_mode(&self) -> bool {
        self.settings.dark_mode
    }

    pub fn language(&self) -> &LanguageCode {
        &self.settings.language
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    pub fn task(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Wall-clock milliseconds, bumped past the newest id when two tasks
    /// land in the same millisecond or the clock steps backwards. Once the
    /// id range is exhausted, the highest id not in the list is used.
    fn next_id(&mut self) -> i64 {
        let now = self.clock.now().timestamp_millis();
        if now > self.last_id {
            self.last_id = now;
            return now;
        }
        match self.last_id.checked_add(1) {
            Some(id) => {
                self.last_id = id;
                id
            }
            None => self.unused_id(),
        }
    }

    fn unused_id(&self) -> i64 {
        let taken: HashSet<i64> = self.tasks.iter().map(|t| t.id).collect();
        // At most `taken.len() + 1` candidates are visited.
        (i64::MIN..=i64::MAX)
            .rev()
            .find(|id| !taken.contains(id))
            .unwrap_or(i64::MIN)
    }

    /// Appends a task and returns its id, or `None` when the text is blank.
    pub fn add_task(
        &mut self,
        text: &str,
        due_date: Option<&str>,
        due_time: Option<&str>,
    ) -> Result<Option<i64>, StorageError> {
        let mut task = match Task::new(0, text, due_date.unwrap_or(""), due_time.unwrap_or("")) {
            Ok(task) => task,
            Err(e) => {
                log::debug!("ignoring task: {}", e);
                return Ok(None);
            }
        };

        task.id = self.next_id();
        let id = task.id;
        self.tasks.push(task);
        self.persistence.save_tasks(&self.tasks)?;
        Ok(Some(id))
    }

    /// Flips completion of the task with `id`. Returns whether a task
    /// matched.
    pub fn toggle_task(&mut self, id: i64) -> Result<bool, StorageError> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(false);
        };
        task.toggle();
        self.persistence.save_tasks(&self.tasks)?;
        Ok(true)
    }

    pub fn delete_task(&mut self, id: i64) -> Result<bool, StorageError> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            return Ok(false);
        }
        self.persistence.save_tasks(&self.tasks)?;
        Ok(true)
    }

    /// Drops every completed task and returns how many were removed.
    pub fn clear_completed(&mut self) -> Result<usize, StorageError> {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.completed);
        self.persistence.save_tasks(&self.tasks)?;
        Ok(before - self.tasks.len())
    }

    pub fn set_dark_mode(&mut self, flag: bool) -> Result<(), StorageError> {
        self.settings.dark_mode = flag;
        self.persistence.save_dark_mode(flag)
    }

    pub fn toggle_dark_mode(&mut self) -> Result<bool, StorageError> {
        let flag = !self.settings.dark_mode;
        self.set_dark_mode(flag)?;
        Ok(flag)
    }

    pub fn set_language(&mut self, code: LanguageCode) -> Result<(), StorageError> {
        self.settings.language = code;
        self.persistence.save_language(&self.settings.language)
    }

    pub fn export_as_text(&self) -> String {
        self.tasks
            .iter()
            .map(Task::export_line)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
