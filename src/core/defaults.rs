//! Process-wide default settings

/// Template used by console streams unless overridden
pub const DEFAULT_CONSOLE_FORMAT: &str = "%a[{levelname}]% [{logger}]";

/// Template used by file streams unless overridden
pub const DEFAULT_FILE_FORMAT: &str = "[{levelname}] [{time}] [{filename}]";

/// strftime pattern for the `{time}` placeholder
pub const DEFAULT_TIME_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// File name appended when a log path points at a directory
pub const DEFAULT_LOG_FILENAME: &str = "log";

/// Sink name of the standard output stream
pub const STDOUT_NAME: &str = "<stdout>";

/// Sink name of the standard error stream
pub const STDERR_NAME: &str = "<stderr>";

/// Sink names routed by `update_level` rather than `update_file_level`
pub const CONSOLE_NAMES: [&str; 2] = [STDOUT_NAME, STDERR_NAME];

/// Exit code used by `critical` when the caller does not pick one
pub const DEFAULT_CRITICAL_EXIT_CODE: i32 = 1;

pub fn is_console_name(name: &str) -> bool {
    CONSOLE_NAMES.contains(&name)
}
