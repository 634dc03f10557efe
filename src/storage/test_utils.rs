use crate::adapter::{RecordingLog, StatePersistence, StoreAdapter};
use crate::clock::FixedClock;
use crate::models::{LanguageCode, Task, TaskList};
use crate::storage::{JsonFileStore, KeyValueStore, StorageError};
use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use tempfile::TempDir;

/// A JSON file store living in its own temporary directory.
pub struct TestStore {
    temp_dir: TempDir,
    store: JsonFileStore,
}

impl TestStore {
    pub fn new() -> Self {
        let temp_dir = tempfile::Builder::new()
            .prefix("trtodo_test")
            .tempdir()
            .expect("Failed to create temporary directory");
        let store = JsonFileStore::new(temp_dir.path().join("state.json"));
        Self { temp_dir, store }
    }

    pub fn store(&self) -> &JsonFileStore {
        &self.store
    }

    pub fn reopen(&self) -> JsonFileStore {
        JsonFileStore::new(self.store.path())
    }

    pub fn path(&self) -> PathBuf {
        self.temp_dir.path().to_path_buf()
    }
}

/// A store whose every operation fails, as a full disk or revoked
/// permission would.
pub struct FailingStore;

impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Storage("store unavailable".to_string()))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Storage("store unavailable".to_string()))
    }
}

pub fn recording_adapter<S: KeyValueStore>(store: S) -> (StoreAdapter<S>, RecordingLog) {
    let log = RecordingLog::new();
    let adapter = StoreAdapter::with_recovery_log(store, Box::new(log.clone()));
    (adapter, log)
}

pub fn sample_tasks() -> TaskList {
    vec![
        Task {
            id: 1_714_560_000_000,
            text: "Buy milk".to_string(),
            completed: false,
            due_date: "2024-05-01".to_string(),
            due_time: "14:30".to_string(),
        },
        Task {
            id: 1_714_560_000_001,
            text: "Post letter".to_string(),
            completed: true,
            due_date: String::new(),
            due_time: String::new(),
        },
        Task {
            id: 1_714_560_000_002,
            text: "Book dentist".to_string(),
            completed: false,
            due_date: "2024-06-12".to_string(),
            due_time: String::new(),
        },
    ]
}

pub fn test_clock() -> FixedClock {
    FixedClock::from_millis(1_714_560_000_000)
}

/// In-memory persistence that counts every load and save call.
#[derive(Default)]
pub struct CountingPersistence {
    pub tasks: RefCell<TaskList>,
    pub dark_mode: Cell<bool>,
    pub language: RefCell<LanguageCode>,
    pub loads: Cell<usize>,
    pub task_saves: Cell<usize>,
    pub dark_mode_saves: Cell<usize>,
    pub language_saves: Cell<usize>,
}

impl CountingPersistence {
    pub fn with_tasks(tasks: TaskList) -> Self {
        Self {
            tasks: RefCell::new(tasks),
            ..Default::default()
        }
    }

    pub fn total_saves(&self) -> usize {
        self.task_saves.get() + self.dark_mode_saves.get() + self.language_saves.get()
    }
}

impl StatePersistence for CountingPersistence {
    fn load_tasks(&self) -> TaskList {
        self.loads.set(self.loads.get() + 1);
        self.tasks.borrow().clone()
    }

    fn save_tasks(&self, tasks: &[Task]) -> Result<(), StorageError> {
        self.task_saves.set(self.task_saves.get() + 1);
        *self.tasks.borrow_mut() = tasks.to_vec();
        Ok(())
    }

    fn load_dark_mode(&self) -> bool {
        self.loads.set(self.loads.get() + 1);
        self.dark_mode.get()
    }

    fn save_dark_mode(&self, flag: bool) -> Result<(), StorageError> {
        self.dark_mode_saves.set(self.dark_mode_saves.get() + 1);
        self.dark_mode.set(flag);
        Ok(())
    }

    fn load_language(&self) -> LanguageCode {
        self.loads.set(self.loads.get() + 1);
        self.language.borrow().clone()
    }

    fn save_language(&self, code: &LanguageCode) -> Result<(), StorageError> {
        self.language_saves.set(self.language_saves.get() + 1);
        *self.language.borrow_mut() = code.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::StatePersistence;

    #[test]
    fn test_storage_initialization() {
        let test_store = TestStore::new();
        assert!(test_store.path().exists());
        assert_eq!(test_store.store().get("tasks").expect("Failed to read store"), None);
    }

    #[test]
    fn test_state_survives_reopen() {
        let test_store = TestStore::new();
        let adapter = StoreAdapter::new(test_store.store());
        adapter.save_tasks(&sample_tasks()).expect("Failed to save tasks");
        adapter.save_dark_mode(true).expect("Failed to save dark mode");

        let reopened = StoreAdapter::new(test_store.reopen());
        assert_eq!(reopened.load_tasks(), sample_tasks());
        assert!(reopened.load_dark_mode());
    }
}
