//! Translation between in-memory state and the named records of a
//! [`KeyValueStore`].
//!
//! Loads are total: a record that is missing yields its default, and a
//! record that cannot be read or parsed is reported to the adapter's
//! [`RecoveryLog`] before the default is returned. Corrupted storage must
//! never keep the application from starting.

use crate::models::{validate_tasks, LanguageCode, Task, TaskError, TaskList};
use crate::storage::{KeyValueStore, StorageError};
use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;

pub const TASKS_KEY: &str = "tasks";
pub const DARK_MODE_KEY: &str = "darkMode";
pub const LANGUAGE_KEY: &str = "language";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Malformed record: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Invalid data: {0}")]
    Invalid(#[from] TaskError),
}

/// Receives the load failures the adapter masks with defaults.
pub trait RecoveryLog {
    fn record_failure(&self, key: &str, error: &LoadError);
}

/// Forwards masked failures to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogRecovery;

impl RecoveryLog for LogRecovery {
    fn record_failure(&self, key: &str, error: &LoadError) {
        log::warn!("Failed to load stored {}: {}; using default", key, error);
    }
}

/// Keeps masked failures in memory as `(key, message)` pairs. Clones share
/// the same buffer.
#[derive(Debug, Default, Clone)]
pub struct RecordingLog {
    entries: Rc<RefCell<Vec<(String, String)>>>,
}

impl RecordingLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<(String, String)> {
        self.entries.borrow().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl RecoveryLog for RecordingLog {
    fn record_failure(&self, key: &str, error: &LoadError) {
        self.entries
            .borrow_mut()
            .push((key.to_string(), error.to_string()));
    }
}

/// Durable persistence of the three application records.
pub trait StatePersistence {
    fn load_tasks(&self) -> TaskList;
    fn save_tasks(&self, tasks: &[Task]) -> Result<(), StorageError>;
    fn load_dark_mode(&self) -> bool;
    fn save_dark_mode(&self, flag: bool) -> Result<(), StorageError>;
    fn load_language(&self) -> LanguageCode;
    fn save_language(&self, code: &LanguageCode) -> Result<(), StorageError>;
}

impl<P: StatePersistence + ?Sized> StatePersistence for &P {
    fn load_tasks(&self) -> TaskList {
        (**self).load_tasks()
    }

    fn save_tasks(&self, tasks: &[Task]) -> Result<(), StorageError> {
        (**self).save_tasks(tasks)
    }

    fn load_dark_mode(&self) -> bool {
        (**self).load_dark_mode()
    }

    fn save_dark_mode(&self, flag: bool) -> Result<(), StorageError> {
        (**self).save_dark_mode(flag)
    }

    fn load_language(&self) -> LanguageCode {
        (**self).load_language()
    }

    fn save_language(&self, code: &LanguageCode) -> Result<(), StorageError> {
        (**self).save_language(code)
    }
}

pub struct StoreAdapter<S: KeyValueStore> {
    store: S,
    recovery: Box<dyn RecoveryLog>,
}

impl<S: KeyValueStore> StoreAdapter<S> {
    pub fn new(store: S) -> Self {
        Self::with_recovery_log(store, Box::new(LogRecovery))
    }

    pub fn with_recovery_log(store: S, recovery: Box<dyn RecoveryLog>) -> Self {
        Self { store, recovery }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn try_load_tasks(&self) -> Result<Option<TaskList>, LoadError> {
        let Some(raw) = self.store.get(TASKS_KEY)? else {
            return Ok(None);
        };
        // A stored `null` counts as absent.
        let tasks: Option<TaskList> = serde_json::from_str(&raw)?;
        if let Some(ref tasks) = tasks {
            validate_tasks(tasks)?;
        }
        Ok(tasks)
    }

    fn try_load_dark_mode(&self) -> Result<Option<bool>, LoadError> {
        let Some(raw) = self.store.get(DARK_MODE_KEY)? else {
            return Ok(None);
        };
        let flag: Option<bool> = serde_json::from_str(&raw)?;
        Ok(flag)
    }

    fn try_load_language(&self) -> Result<Option<LanguageCode>, LoadError> {
        let code = self.store.get(LANGUAGE_KEY)?;
        Ok(code.filter(|c| !c.is_empty()).map(LanguageCode::new))
    }

    fn recover<T: Default>(&self, key: &str, result: Result<Option<T>, LoadError>) -> T {
        match result {
            Ok(value) => value.unwrap_or_default(),
            Err(e) => {
                self.recovery.record_failure(key, &e);
                T::default()
            }
        }
    }
}

impl<S: KeyValueStore> StatePersistence for StoreAdapter<S> {
    fn load_tasks(&self) -> TaskList {
        self.recover(TASKS_KEY, self.try_load_tasks())
    }

    fn save_tasks(&self, tasks: &[Task]) -> Result<(), StorageError> {
        let json = serde_json::to_string(tasks)?;
        self.store.set(TASKS_KEY, &json)
    }

    fn load_dark_mode(&self) -> bool {
        self.recover(DARK_MODE_KEY, self.try_load_dark_mode())
    }

    fn save_dark_mode(&self, flag: bool) -> Result<(), StorageError> {
        let json = serde_json::to_string(&flag)?;
        self.store.set(DARK_MODE_KEY, &json)
    }

    fn load_language(&self) -> LanguageCode {
        self.recover(LANGUAGE_KEY, self.try_load_language())
    }

    fn save_language(&self, code: &LanguageCode) -> Result<(), StorageError> {
        self.store.set(LANGUAGE_KEY, code.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_utils::{recording_adapter, sample_tasks, FailingStore};
    use crate::storage::MemoryStore;

    #[test]
    fn test_missing_records_load_defaults() {
        let (adapter, log) = recording_adapter(MemoryStore::new());

        assert!(adapter.load_tasks().is_empty());
        assert!(!adapter.load_dark_mode());
        assert_eq!(adapter.load_language().as_str(), "en");
        assert!(log.is_empty());
    }

    #[test]
    fn test_tasks_round_trip() {
        let (adapter, _log) = recording_adapter(MemoryStore::new());
        let tasks = sample_tasks();

        adapter.save_tasks(&tasks).unwrap();
        assert_eq!(adapter.load_tasks(), tasks);
    }

    #[test]
    fn test_unparseable_tasks_are_masked_and_logged() {
        let store = MemoryStore::new().with_record(TASKS_KEY, "{definitely not json");
        let (adapter, log) = recording_adapter(store);

        assert!(adapter.load_tasks().is_empty());
        let entries = log.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0, TASKS_KEY);
    }

    #[test]
    fn test_wrong_shape_tasks_are_masked() {
        let store = MemoryStore::new()
            .with_record(TASKS_KEY, r#"[{"id":1,"text":"x","completed":"yes"}]"#);
        let (adapter, log) = recording_adapter(store);

        assert!(adapter.load_tasks().is_empty());
        assert_eq!(log.entries().len(), 1);
    }

    #[test]
    fn test_duplicate_ids_are_masked() {
        let store = MemoryStore::new().with_record(
            TASKS_KEY,
            r#"[{"id":1,"text":"a","completed":false},{"id":1,"text":"b","completed":true}]"#,
        );
        let (adapter, log) = recording_adapter(store);

        assert!(adapter.load_tasks().is_empty());
        assert!(log.entries()[0].1.contains("Duplicate task id: 1"));
    }

    #[test]
    fn test_null_records_are_not_failures() {
        let store = MemoryStore::new()
            .with_record(TASKS_KEY, "null")
            .with_record(DARK_MODE_KEY, "null");
        let (adapter, log) = recording_adapter(store);

        assert!(adapter.load_tasks().is_empty());
        assert!(!adapter.load_dark_mode());
        assert!(log.is_empty());
    }

    #[test]
    fn test_dark_mode_round_trip_and_corruption() {
        let (adapter, log) = recording_adapter(MemoryStore::new());
        adapter.save_dark_mode(true).unwrap();
        assert!(adapter.load_dark_mode());
        assert_eq!(adapter.store().get(DARK_MODE_KEY).unwrap(), Some("true".to_string()));

        adapter.store().set(DARK_MODE_KEY, "maybe").unwrap();
        assert!(!adapter.load_dark_mode());
        assert_eq!(log.entries()[0].0, DARK_MODE_KEY);
    }

    #[test]
    fn test_language_is_stored_as_plain_string() {
        let (adapter, log) = recording_adapter(MemoryStore::new());

        adapter.save_language(&LanguageCode::new("th")).unwrap();
        assert_eq!(adapter.store().get(LANGUAGE_KEY).unwrap(), Some("th".to_string()));
        assert_eq!(adapter.load_language().as_str(), "th");

        // Unknown codes pass through untouched.
        adapter.save_language(&LanguageCode::new("xx")).unwrap();
        assert_eq!(adapter.load_language().as_str(), "xx");

        adapter.store().set(LANGUAGE_KEY, "").unwrap();
        assert_eq!(adapter.load_language().as_str(), "en");
        assert!(log.is_empty());
    }

    #[test]
    fn test_store_read_failures_are_masked() {
        let (adapter, log) = recording_adapter(FailingStore);

        assert!(adapter.load_tasks().is_empty());
        assert!(!adapter.load_dark_mode());
        assert_eq!(adapter.load_language().as_str(), "en");

        let keys: Vec<String> = log.entries().into_iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec![TASKS_KEY, DARK_MODE_KEY, LANGUAGE_KEY]);
    }

    #[test]
    fn test_store_write_failures_propagate() {
        let (adapter, _log) = recording_adapter(FailingStore);
        assert!(adapter.save_tasks(&sample_tasks()).is_err());
        assert!(adapter.save_dark_mode(true).is_err());
    }
}
