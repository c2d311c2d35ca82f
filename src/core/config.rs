//! Logger configuration

use super::defaults::{DEFAULT_CONSOLE_FORMAT, DEFAULT_FILE_FORMAT};
use super::error::Result;
use super::log_level::LogLevel;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Options for constructing a [`Logger`](super::Logger)
///
/// Every field but `name` is optional when deserializing.
///
/// # Examples
///
/// ```
/// use multistream_logger::core::{LogLevel, LoggerConfig};
///
/// let config = LoggerConfig::from_json(r#"{ "name": "api", "level": "WARNING" }"#).unwrap();
/// assert_eq!(config.level, LogLevel::Warning);
/// assert_eq!(config.file_level, LogLevel::Debug);
/// assert!(config.log_path.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggerConfig {
    pub name: String,

    /// Console template; also the file template when `file_format` is unset
    #[serde(default)]
    pub format: Option<String>,

    #[serde(default)]
    pub file_format: Option<String>,

    /// Log file, or a directory that receives the default file name
    #[serde(default)]
    pub log_path: Option<PathBuf>,

    #[serde(default = "default_level")]
    pub level: LogLevel,

    #[serde(default = "default_file_level")]
    pub file_level: LogLevel,

    #[serde(default)]
    pub disable_file: bool,

    #[serde(default)]
    pub time_format: Option<String>,

    /// Push this logger's formats, file flag and level to every registered stream
    #[serde(default)]
    pub update_all: bool,
}

fn default_level() -> LogLevel {
    LogLevel::Info
}

fn default_file_level() -> LogLevel {
    LogLevel::Debug
}

impl LoggerConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            format: None,
            file_format: None,
            log_path: None,
            level: default_level(),
            file_level: default_file_level(),
            disable_file: false,
            time_format: None,
            update_all: false,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Template for console streams
    pub fn console_format(&self) -> &str {
        non_empty(&self.format).unwrap_or(DEFAULT_CONSOLE_FORMAT)
    }

    /// Template for file streams: explicit file format, else the console
    /// format if one was given, else the default file template
    pub fn resolved_file_format(&self) -> &str {
        non_empty(&self.file_format)
            .or_else(|| non_empty(&self.format))
            .unwrap_or(DEFAULT_FILE_FORMAT)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
