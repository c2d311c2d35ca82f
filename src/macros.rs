//! Logging macros for ergonomic log message formatting.
//!
//! These macros format their arguments like `format!` and record the file,
//! line and enclosing function of the call, so `{funcname}` is filled in.
//!
//! # Examples
//!
//! ```
//! use multistream_logger::prelude::*;
//! use multistream_logger::info;
//!
//! let logger = Logger::builder("server")
//!     .registry(StreamRegistry::shared())
//!     .build()
//!     .unwrap();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! ```

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```
/// # use multistream_logger::prelude::*;
/// # let logger = Logger::builder("app").registry(StreamRegistry::shared()).build().unwrap();
/// use multistream_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.emit($level, $crate::caller!(), format!($($arg)+))
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use multistream_logger::prelude::*;
/// # let logger = Logger::builder("app").registry(StreamRegistry::shared()).build().unwrap();
/// use multistream_logger::warning;
/// warning!(logger, "Memory usage high: {}%", 85);
/// ```
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warning, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a critical message and exit the process.
///
/// Exits with the default critical exit code; use `critical!(logger, code = N; ...)`
/// to pick one.
#[macro_export]
macro_rules! critical {
    ($logger:expr, code = $code:expr; $($arg:tt)+) => {
        $logger.emit_critical($crate::caller!(), format!($($arg)+), $code)
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.emit_critical(
            $crate::caller!(),
            format!($($arg)+),
            $crate::core::defaults::DEFAULT_CRITICAL_EXIT_CODE,
        )
    };
}
