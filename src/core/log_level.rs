//! Log level definitions

use super::error::{LoggerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
#[serde(try_from = "String", into = "String")]
pub enum LogLevel {
    Debug = 0,
    #[default]
    Info = 1,
    Warning = 2,
    Error = 3,
    Critical = 4,
}

impl LogLevel {
    /// Every level, lowest severity first
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warning,
        LogLevel::Error,
        LogLevel::Critical,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Critical => "CRITICAL",
        }
    }

    pub fn number(&self) -> u8 {
        *self as u8
    }

    /// Look a level up by its numeric value
    pub fn from_number(number: u8) -> Result<Self> {
        Self::ALL
            .get(usize::from(number))
            .copied()
            .ok_or_else(|| LoggerError::invalid_level_number(number))
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(LogLevel::to_str).collect()
    }

    /// Colour used by the `%a...%` auto directive
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Debug => Blue,
            LogLevel::Info => Green,
            LogLevel::Warning => Yellow,
            LogLevel::Error => Red,
            LogLevel::Critical => Red,
        }
    }
}

/// Numeric value for a level name. Names are matched exactly.
pub fn level_number(name: &str) -> Result<u8> {
    name.parse::<LogLevel>().map(|level| level.number())
}

/// Level name for a numeric value
pub fn level_name(number: u8) -> Result<&'static str> {
    LogLevel::from_number(number).map(|level| level.to_str())
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|level| level.to_str() == s)
            .ok_or_else(|| LoggerError::invalid_level(s))
    }
}

impl TryFrom<u8> for LogLevel {
    type Error = LoggerError;

    fn try_from(number: u8) -> Result<Self> {
        Self::from_number(number)
    }
}

impl TryFrom<String> for LogLevel {
    type Error = LoggerError;

    fn try_from(name: String) -> Result<Self> {
        name.parse()
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        level.to_str().to_string()
    }
}
