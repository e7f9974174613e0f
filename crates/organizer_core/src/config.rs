//! Runtime configuration resolved from the process environment.
//!
//! # Invariants
//! - Unset variables fall back to defaults; set-but-invalid values are errors.
//! - Logging stays disabled unless a log directory is configured.

use crate::logging::{default_log_level, normalize_level};
use crate::service::focus_timer::DEFAULT_FOCUS_MINUTES;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "ORGANIZER_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "ORGANIZER_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "ORGANIZER_LOG_DIR";
pub const FOCUS_MINUTES_ENV: &str = "ORGANIZER_FOCUS_MINUTES";

const DEFAULT_DB_FILE_NAME: &str = "organizer.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue {
        variable: &'static str,
        value: String,
        reason: String,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue {
                variable,
                value,
                reason,
            } => write!(f, "invalid {variable}=`{value}`: {reason}"),
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub log_level: &'static str,
    /// Absolute directory for rolling log files; `None` disables file logging.
    pub log_dir: Option<PathBuf>,
    pub focus_minutes: u32,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level(),
            log_dir: None,
            focus_minutes: DEFAULT_FOCUS_MINUTES,
        }
    }
}

impl CoreConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(path) = read(DB_PATH_ENV) {
            config.db_path = PathBuf::from(path.trim());
        }
        if let Some(level) = read(LOG_LEVEL_ENV) {
            config.log_level = normalize_level(&level).map_err(|err| ConfigError::InvalidValue {
                variable: LOG_LEVEL_ENV,
                value: level.clone(),
                reason: err.to_string(),
            })?;
        }
        if let Some(dir) = read(LOG_DIR_ENV) {
            let path = PathBuf::from(dir.trim());
            if !path.is_absolute() {
                return Err(ConfigError::InvalidValue {
                    variable: LOG_DIR_ENV,
                    value: dir,
                    reason: "must be an absolute path".to_string(),
                });
            }
            config.log_dir = Some(path);
        }
        if let Some(minutes) = read(FOCUS_MINUTES_ENV) {
            config.focus_minutes = match minutes.trim().parse::<u32>() {
                Ok(value) if value > 0 => value,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        variable: FOCUS_MINUTES_ENV,
                        value: minutes,
                        reason: "expected a positive whole number of minutes".to_string(),
                    })
                }
            };
        }

        Ok(config)
    }
}
