//! Error types for the logger system

use super::log_level::LogLevel;

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Level name outside the recognised scale
    #[error("{level}: is an invalid level. Expected one of these: {}", LogLevel::names().join(", "))]
    InvalidLevel { level: String },

    /// Level number outside the recognised scale
    #[error("{number}: Not a valid level number (expected 0-{})", LogLevel::Critical as u8)]
    InvalidLevelNumber { number: i64 },

    /// Sink rejected at stream construction
    #[error("Invalid stream '{name}': {message}")]
    InvalidStream { name: String, message: String },

    /// Stream handle that can no longer be registered or removed
    #[error("Invalid output stream '{name}': {message}")]
    InvalidOutputStream { name: String, message: String },

    /// Formatter error with the offending component
    #[error("Formatter error ({component}): {message}")]
    FormatterError { component: String, message: String },

    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON configuration error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Writer error (generic)
    #[error("Writer error: {0}")]
    WriterError(String),
}

impl LoggerError {
    /// Create an invalid level error
    pub fn invalid_level(level: impl Into<String>) -> Self {
        LoggerError::InvalidLevel {
            level: level.into(),
        }
    }

    /// Create an invalid level number error
    pub fn invalid_level_number(number: impl Into<i64>) -> Self {
        LoggerError::InvalidLevelNumber {
            number: number.into(),
        }
    }

    /// Create an invalid stream error
    pub fn invalid_stream(name: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidStream {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create an invalid output stream error
    pub fn invalid_output_stream(name: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidOutputStream {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a formatter error
    pub fn formatter(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FormatterError {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a writer error (generic)
    pub fn writer<S: Into<String>>(msg: S) -> Self {
        LoggerError::WriterError(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::invalid_level("VERBOSE");
        assert!(matches!(err, LoggerError::InvalidLevel { .. }));

        let err = LoggerError::invalid_stream("", "empty sink name");
        assert!(matches!(err, LoggerError::InvalidStream { .. }));

        let err = LoggerError::invalid_output_stream("app.log", "stream was released");
        assert!(matches!(err, LoggerError::InvalidOutputStream { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::invalid_level("VERBOSE");
        assert_eq!(
            err.to_string(),
            "VERBOSE: is an invalid level. Expected one of these: DEBUG, INFO, WARNING, ERROR, CRITICAL"
        );

        let err = LoggerError::invalid_level_number(7);
        assert_eq!(err.to_string(), "7: Not a valid level number (expected 0-4)");

        let err = LoggerError::formatter("template", "unknown placeholder '{user}'");
        assert_eq!(
            err.to_string(),
            "Formatter error (template): unknown placeholder '{user}'"
        );
    }

    #[test]
    fn test_io_operation_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = LoggerError::io_operation("creating log file", "cannot create /var/log/x", io_err);

        assert!(matches!(err, LoggerError::IoOperation { .. }));
        assert!(err.to_string().contains("creating log file"));
        assert!(err.to_string().contains("cannot create /var/log/x"));
    }
}
