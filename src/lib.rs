pub mod adapter;
pub mod cli;
pub mod clock;
pub mod commands;
pub mod config;
pub mod controller;
pub mod export;
pub mod i18n;
pub mod models;
pub mod status;
pub mod storage;

pub use adapter::{LogRecovery, RecordingLog, RecoveryLog, StatePersistence, StoreAdapter};
pub use controller::TaskListController;
pub use models::{AppSettings, LanguageCode, Task, TaskList};
pub use storage::{KeyValueStore, MemoryStore, StorageError};
