//! Session configuration
//!
//! Every field has a default, so a config file only needs the settings it
//! changes. Command-line flags are applied on top through the builder setters.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default catalog document path
pub const DEFAULT_META_PATH: &str = "db_meta.json";

/// Default directory for per-table documents
pub const DEFAULT_DATA_DIR: &str = "data";

/// Default log filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog document path
    pub meta_path: PathBuf,
    /// Directory holding `<table>.json` documents
    pub data_dir: PathBuf,
    /// Ask before `drop_table` and `delete`
    pub confirm_destructive: bool,
    /// Memoize select results until the table changes
    pub cache_selects: bool,
    /// Print how long each command took
    pub show_timing: bool,
    /// Log filter used when `RUST_LOG` is unset
    pub log_level: String,
    /// Line-editor history file
    pub history_file: Option<PathBuf>,
    /// Keep everything in memory instead of on disk
    pub in_memory: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            meta_path: PathBuf::from(DEFAULT_META_PATH),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            confirm_destructive: true,
            cache_selects: true,
            show_timing: false,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            history_file: None,
            in_memory: false,
        }
    }
}

impl Config {
    /// Create a config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a JSON config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.as_ref().display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings no session can run with
    pub fn validate(&self) -> Result<()> {
        if self.meta_path.as_os_str().is_empty() {
            return Err(Error::Config("meta_path cannot be empty".to_string()));
        }
        if self.data_dir.as_os_str().is_empty() {
            return Err(Error::Config("data_dir cannot be empty".to_string()));
        }
        if self.log_level.trim().is_empty() {
            return Err(Error::Config("log_level cannot be empty".to_string()));
        }
        Ok(())
    }

    /// Set the catalog document path
    pub fn meta_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.meta_path = path.into();
        self
    }

    /// Set the table document directory
    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Enable or disable confirmation of destructive commands
    pub fn confirm_destructive(mut self, confirm: bool) -> Self {
        self.confirm_destructive = confirm;
        self
    }

    /// Enable or disable select memoization
    pub fn cache_selects(mut self, cache: bool) -> Self {
        self.cache_selects = cache;
        self
    }

    /// Enable or disable per-command timing
    pub fn show_timing(mut self, show: bool) -> Self {
        self.show_timing = show;
        self
    }

    /// Set the fallback log filter
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Set the history file
    pub fn history_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.history_file = Some(path.into());
        self
    }

    /// Keep the database in memory
    pub fn in_memory(mut self, in_memory: bool) -> Self {
        self.in_memory = in_memory;
        self
    }
}
