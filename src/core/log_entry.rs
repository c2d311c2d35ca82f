//! Log entry structure

use super::caller::CallerInfo;
use super::log_level::LogLevel;
use chrono::{DateTime, Local};
use std::fmt;

/// One emission, built once by the logger and shared by every stream it reaches
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub logger: String,
    pub caller: CallerInfo,
    pub timestamp: DateTime<Local>,
}

impl LogEntry {
    pub fn new(
        level: LogLevel,
        message: impl Into<String>,
        logger: impl Into<String>,
        caller: CallerInfo,
    ) -> Self {
        Self {
            level,
            message: message.into(),
            logger: logger.into(),
            caller,
            timestamp: Local::now(),
        }
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

/// Join a message with extra arguments, separated by single spaces
pub fn compose_message(message: impl fmt::Display, args: &[&dyn fmt::Display]) -> String {
    let mut composed = message.to_string();
    for arg in args {
        composed.push(' ');
        composed.push_str(&arg.to_string());
    }
    composed
}
