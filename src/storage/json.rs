use super::{KeyValueStore, StorageError};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

type Records = BTreeMap<String, String>;

/// Stores every record in one JSON object file, `{"key": "value", ...}`.
///
/// The file is re-read on each access so the store never serves stale data,
/// and replaced atomically on each write.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_records(&self) -> Result<Records, StorageError> {
        if !self.path.exists() {
            return Ok(Records::new());
        }

        let contents = std::fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(Records::new());
        }

        let records: Records = serde_json::from_str(&contents)?;
        Ok(records)
    }

    fn write_records(&self, records: &Records) -> Result<(), StorageError> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&parent)?;

        let json = serde_json::to_string_pretty(records)?;
        let mut file = tempfile::NamedTempFile::new_in(&parent)?;
        file.write_all(json.as_bytes())?;
        file.as_file().sync_all()?;
        file.persist(&self.path).map_err(|e| e.error)?;

        // Verify the write was successful by reading back
        let read_back = self.read_records()?;
        if read_back.len() != records.len() {
            return Err(StorageError::Storage(
                "Data integrity check failed".to_string(),
            ));
        }

        Ok(())
    }

    /// Loads the current records for a write. A store file that no longer
    /// parses is replaced rather than blocking every future write.
    fn records_for_update(&self) -> Result<Records, StorageError> {
        match self.read_records() {
            Ok(records) => Ok(records),
            Err(StorageError::Serialization(e)) => {
                log::warn!(
                    "store file {} is not valid JSON ({}); rewriting it",
                    self.path.display(),
                    e
                );
                Ok(Records::new())
            }
            Err(e) => Err(e),
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut records = self.read_records()?;
        Ok(records.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut records = self.records_for_update()?;
        records.insert(key.to_string(), value.to_string());
        self.write_records(&records)?;
        log::debug!("wrote record {} to {}", key, self.path.display());
        Ok(())
    }
}
