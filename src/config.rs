use crate::storage::{StorageError, StorageType};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_ENV_VAR: &str = "TRTODO_CONFIG";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

impl From<StorageError> for ConfigError {
    fn from(error: StorageError) -> Self {
        ConfigError::Storage(error.to_string())
    }
}

const VALID_STORAGE_TYPES: &[&str] = &["json", "sqlite"];
const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

pub const KEYS: &[&str] = &["storage.type", "storage.path", "log-level"];

fn validate_storage_path(path: &str) -> Result<PathBuf, ConfigError> {
    // Check for null bytes and other invalid characters
    if path.contains('\0') {
        return Err(ConfigError::InvalidConfig(
            "Path contains invalid characters".to_string(),
        ));
    }

    if path.trim().is_empty() {
        return Err(ConfigError::InvalidConfig(
            "Path cannot be empty".to_string(),
        ));
    }

    let path = shellexpand::tilde(path);
    Ok(PathBuf::from(path.as_ref()))
}

fn validate_storage_type(value: &str) -> Result<(), ConfigError> {
    if !VALID_STORAGE_TYPES.contains(&value) {
        return Err(ConfigError::InvalidConfig(format!(
            "storage.type must be one of: {}",
            VALID_STORAGE_TYPES.join(", ")
        )));
    }
    Ok(())
}

fn validate_log_level(value: &str) -> Result<(), ConfigError> {
    if !VALID_LOG_LEVELS.contains(&value) {
        return Err(ConfigError::InvalidConfig(format!(
            "log-level must be one of: {}",
            VALID_LOG_LEVELS.join(", ")
        )));
    }
    Ok(())
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub storage_type: Option<String>,
    #[serde(default)]
    pub storage_path: Option<String>,
    #[serde(default)]
    pub log_level: Option<String>,
}

impl Config {
    pub fn with_defaults() -> Self {
        Self {
            storage_type: default_storage_type(),
            storage_path: default_storage_path(),
            log_level: default_log_level(),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref storage_type) = self.storage_type {
            validate_storage_type(storage_type)?;
        }
        if let Some(ref path) = self.storage_path {
            validate_storage_path(path)?;
        }
        if let Some(ref level) = self.log_level {
            validate_log_level(level)?;
        }
        Ok(())
    }

    pub fn storage_type(&self) -> StorageType {
        self.storage_type
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or(StorageType::Json)
    }

    pub fn storage_path(&self) -> Result<PathBuf, ConfigError> {
        match self.storage_path.as_deref().or(default_storage_path().as_deref()) {
            Some(path) => validate_storage_path(path),
            None => Err(ConfigError::InvalidConfig(
                "Storage path not configured".to_string(),
            )),
        }
    }

    pub fn log_level(&self) -> log::LevelFilter {
        self.log_level
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or(log::LevelFilter::Warn)
    }
}

fn default_storage_type() -> Option<String> {
    Some("json".to_string())
}

fn default_storage_path() -> Option<String> {
    dirs::home_dir().map(|home| {
        home.join(".config")
            .join("trtodo")
            .join("state.json")
            .to_string_lossy()
            .to_string()
    })
}

fn default_log_level() -> Option<String> {
    Some("warn".to_string())
}

/// Location of the config file: an explicit path, then `$TRTODO_CONFIG`,
/// then `~/.config/trtodo/config.json`.
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.is_empty() {
            return Ok(PathBuf::from(shellexpand::tilde(&path).as_ref()));
        }
    }
    dirs::home_dir()
        .map(|home| home.join(".config").join("trtodo").join("config.json"))
        .ok_or_else(|| {
            ConfigError::InvalidConfig("Could not determine home directory".to_string())
        })
}

pub struct ConfigManager {
    path: PathBuf,
    config: Config,
}

impl ConfigManager {
    /// Reads the config file at `path`. A missing or empty file yields an
    /// empty config, so defaults apply.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref().to_path_buf();
        let config = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            if contents.trim().is_empty() {
                Config::default()
            } else {
                let config: Config = serde_json::from_str(&contents)?;
                config.validate()?;
                config
            }
        } else {
            Config::default()
        };

        Ok(Self { path, config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        // Create parent directories if they don't exist
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(&self.config)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let config = &self.config;
        match key {
            "storage.type" => config.storage_type.clone(),
            "storage.path" => config.storage_path.clone(),
            "log-level" => config.log_level.clone(),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut config = self.config.clone();

        match key {
            "storage.type" => {
                validate_storage_type(value)?;
                if config.storage_type.as_deref().unwrap_or("json") != value {
                    log::warn!("Changing storage type does not migrate existing tasks");
                }
                config.storage_type = Some(value.to_string());
            }
            "storage.path" => {
                let path = validate_storage_path(value)?;
                config.storage_path = Some(path.to_string_lossy().to_string());
            }
            "log-level" => {
                validate_log_level(value)?;
                config.log_level = Some(value.to_string());
            }
            _ => {
                return Err(ConfigError::InvalidKey(key.to_string()));
            }
        }
        config.validate()?;
        self.config = config;
        self.save()
    }

    pub fn unset(&mut self, key: &str) -> Result<(), ConfigError> {
        match key {
            "storage.type" => self.config.storage_type = None,
            "storage.path" => self.config.storage_path = None,
            "log-level" => self.config.log_level = None,
            _ => return Err(ConfigError::InvalidKey(key.to_string())),
        }
        self.save()
    }

    /// Every key with its effective value and whether that value is the
    /// built-in default.
    pub fn list(&self) -> Vec<(String, String, bool)> {
        let defaults = Config::with_defaults();
        let default_manager = ConfigManager {
            path: self.path.clone(),
            config: defaults,
        };

        KEYS.iter()
            .map(|key| match self.get(key) {
                Some(value) => (key.to_string(), value, false),
                None => (
                    key.to_string(),
                    default_manager
                        .get(key)
                        .unwrap_or_else(|| "null".to_string()),
                    true,
                ),
            })
            .collect()
    }
}
