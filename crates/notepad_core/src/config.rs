//! Runtime configuration for hosts embedding the core.
//!
//! # Responsibility
//! - Resolve database path and logging settings from the environment.
//! - Let hosts (CLI flags, FFI arguments) override individual values.
//!
//! # Invariants
//! - Blank environment values are treated as unset.

use crate::logging::default_log_level;
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "NOTEPAD_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "NOTEPAD_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "NOTEPAD_LOG_DIR";
const DEFAULT_DB_FILE_NAME: &str = "notes.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    /// `true` once the environment or a host override chose `log_level`.
    pub log_level_set: bool,
    /// Rolling log directory; `None` keeps file logging off.
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_level_set: false,
            log_dir: None,
        }
    }
}

impl CoreConfig {
    /// Builds a config from `NOTEPAD_*` variables over defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(path) = read(DB_PATH_ENV) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(level) = read(LOG_LEVEL_ENV) {
            config = config.with_log_level(level);
        }
        config.log_dir = read(LOG_DIR_ENV).map(PathBuf::from);
        config
    }

    pub fn with_db_path(mut self, db_path: impl Into<PathBuf>) -> Self {
        self.db_path = db_path.into();
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self.log_level_set = true;
        self
    }

    pub fn with_log_dir(mut self, log_dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(log_dir.into());
        self
    }
}
