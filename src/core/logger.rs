//! Main logger implementation

use super::{
    caller::CallerInfo,
    config::LoggerConfig,
    defaults::DEFAULT_CRITICAL_EXIT_CODE,
    error::{LoggerError, Result},
    formatter::Template,
    log_entry::{compose_message, LogEntry},
    log_level::LogLevel,
    registry::StreamRegistry,
    sink::Sink,
    stream::OutputStream,
    timestamp::TimeFormat,
};
use crate::sinks::{resolve_log_path, ConsoleSink, FileSink};
use parking_lot::RwLock;
use std::fmt;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Prompt shown by [`Logger::hold`]
pub const HOLD_PROMPT: &str = "Screen hold! Press any key to continue";

/// A named handle onto a [`StreamRegistry`]
///
/// Construction registers a console stream and, when a log path is configured,
/// a file stream. After that the handle keeps no formatting state: emission fans
/// out to every stream in the registry, including streams registered by other
/// handles, and the `update_*` methods rewrite those shared streams.
pub struct Logger {
    name: String,
    level: RwLock<LogLevel>,
    file_level: RwLock<LogLevel>,
    disable_file: AtomicBool,
    log_file: Option<PathBuf>,
    registry: Arc<StreamRegistry>,
}

impl Logger {
    /// Logger on the process-wide registry with default settings
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Self::builder(name).build()
    }

    /// Logger on the process-wide registry
    pub fn from_config(config: LoggerConfig) -> Result<Self> {
        Self::with_registry(config, StreamRegistry::global())
    }

    pub fn with_registry(config: LoggerConfig, registry: Arc<StreamRegistry>) -> Result<Self> {
        Self::construct(config, registry, Box::new(ConsoleSink::stdout()))
    }

    fn construct(
        config: LoggerConfig,
        registry: Arc<StreamRegistry>,
        console_sink: Box<dyn Sink>,
    ) -> Result<Self> {
        // Validate everything before the filesystem or the registry is touched
        let console_template = Template::parse(config.console_format())?;
        let file_template = Template::parse(config.resolved_file_format())?;
        let time_format = config.time_format.as_deref().map(TimeFormat::new).transpose()?;

        let mut console = OutputStream::builder_boxed(console_sink)
            .level(config.level)
            .template(console_template.clone());
        if let Some(pattern) = &time_format {
            console = console.time_format(pattern.as_str());
        }
        let console = console.build()?;

        let log_file = config.log_path.as_deref().map(resolve_log_path).transpose()?;
        let disable_file = config.disable_file || log_file.is_none();

        let file = match &log_file {
            Some(path) => {
                let mut file = OutputStream::builder(FileSink::open(path)?)
                    .level(config.file_level)
                    .template(file_template.clone())
                    .disabled(disable_file);
                if let Some(pattern) = &time_format {
                    file = file.time_format(pattern.as_str());
                }
                Some(file.build()?)
            }
            None => None,
        };

        registry.insert(console);
        if let Some(file) = file {
            registry.insert(file);
        }

        let logger = Self {
            name: config.name,
            level: RwLock::new(config.level),
            file_level: RwLock::new(config.file_level),
            disable_file: AtomicBool::new(disable_file),
            log_file,
            registry,
        };

        if config.update_all {
            logger
                .registry
                .update_where(true, |stream| stream.set_template(console_template.clone()));
            logger
                .registry
                .update_where(false, |stream| stream.set_template(file_template.clone()));
            logger.update_disable_file(disable_file);
            logger.set_level(config.level);
        }

        Ok(logger)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Console level last set through this handle
    pub fn level(&self) -> LogLevel {
        *self.level.read()
    }

    /// File level last set through this handle
    pub fn file_level(&self) -> LogLevel {
        *self.file_level.read()
    }

    pub fn is_file_disabled(&self) -> bool {
        self.disable_file.load(Ordering::Acquire)
    }

    /// Resolved log file, `None` when the handle was built without a log path
    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }

    pub fn registry(&self) -> &Arc<StreamRegistry> {
        &self.registry
    }

    /// Every stream this handle writes to
    pub fn streams(&self) -> Vec<Arc<OutputStream>> {
        self.registry.streams()
    }

    /// Fan a message out to every registered stream.
    /// Returns how many streams wrote it.
    pub fn emit(&self, level: LogLevel, caller: CallerInfo, message: impl Into<String>) -> usize {
        let entry = LogEntry::new(level, message, self.name.as_str(), caller);
        self.registry.dispatch(&entry)
    }

    /// Emit at CRITICAL, then terminate the process with `code`
    pub fn emit_critical(&self, caller: CallerInfo, message: impl Into<String>, code: i32) -> ! {
        self.emit(LogLevel::Critical, caller, message);
        std::process::exit(code)
    }

    /// Log at `level` with the call site's file and line.
    ///
    /// Methods cannot see the calling function, so `{funcname}` renders as
    /// `<unknown>`; the [`log!`](crate::log) family of macros fills it in.
    #[track_caller]
    pub fn log(&self, level: LogLevel, message: impl fmt::Display) -> usize {
        self.emit(level, CallerInfo::here(), message.to_string())
    }

    /// Log `message` followed by `args`, joined with spaces
    #[track_caller]
    pub fn log_args(
        &self,
        level: LogLevel,
        message: impl fmt::Display,
        args: &[&dyn fmt::Display],
    ) -> usize {
        self.emit(level, CallerInfo::here(), compose_message(message, args))
    }

    #[inline]
    #[track_caller]
    pub fn debug(&self, message: impl fmt::Display) -> usize {
        self.log(LogLevel::Debug, message)
    }

    /// Log at INFO. `{funcname}` is only filled in by [`info!`](crate::info).
    #[inline]
    #[track_caller]
    pub fn info(&self, message: impl fmt::Display) -> usize {
        self.log(LogLevel::Info, message)
    }

    #[inline]
    #[track_caller]
    pub fn warning(&self, message: impl fmt::Display) -> usize {
        self.log(LogLevel::Warning, message)
    }

    #[inline]
    #[track_caller]
    pub fn error(&self, message: impl fmt::Display) -> usize {
        self.log(LogLevel::Error, message)
    }

    /// Log at CRITICAL and exit with [`DEFAULT_CRITICAL_EXIT_CODE`]
    #[track_caller]
    pub fn critical(&self, message: impl fmt::Display) -> ! {
        self.critical_with_code(message, DEFAULT_CRITICAL_EXIT_CODE)
    }

    #[track_caller]
    pub fn critical_with_code(&self, message: impl fmt::Display, code: i32) -> ! {
        self.emit_critical(CallerInfo::here(), message.to_string(), code)
    }

    #[track_caller]
    pub fn debug_args(&self, message: impl fmt::Display, args: &[&dyn fmt::Display]) -> usize {
        self.log_args(LogLevel::Debug, message, args)
    }

    #[track_caller]
    pub fn info_args(&self, message: impl fmt::Display, args: &[&dyn fmt::Display]) -> usize {
        self.log_args(LogLevel::Info, message, args)
    }

    #[track_caller]
    pub fn warning_args(&self, message: impl fmt::Display, args: &[&dyn fmt::Display]) -> usize {
        self.log_args(LogLevel::Warning, message, args)
    }

    #[track_caller]
    pub fn error_args(&self, message: impl fmt::Display, args: &[&dyn fmt::Display]) -> usize {
        self.log_args(LogLevel::Error, message, args)
    }

    #[track_caller]
    pub fn critical_args(
        &self,
        message: impl fmt::Display,
        args: &[&dyn fmt::Display],
        code: i32,
    ) -> ! {
        self.emit_critical(CallerInfo::here(), compose_message(message, args), code)
    }

    /// Set the threshold of every console stream in the registry
    pub fn update_level(&self, level: &str) -> Result<()> {
        self.set_level(level.parse()?);
        Ok(())
    }

    /// Typed form of [`update_level`](Self::update_level)
    pub fn set_level(&self, level: LogLevel) {
        *self.level.write() = level;
        self.registry
            .update_where(true, |stream| stream.set_level(level));
    }

    /// Set the threshold of every non-console stream in the registry
    pub fn update_file_level(&self, level: &str) -> Result<()> {
        self.set_file_level(level.parse()?);
        Ok(())
    }

    pub fn set_file_level(&self, level: LogLevel) {
        *self.file_level.write() = level;
        self.registry
            .update_where(false, |stream| stream.set_level(level));
    }

    /// Enable or disable every non-console stream in the registry
    pub fn update_disable_file(&self, disable_file: bool) {
        self.disable_file.store(disable_file, Ordering::Release);
        self.registry
            .update_where(false, |stream| stream.set_disabled(disable_file));
    }

    /// Replace console templates with `format` and all others with
    /// `file_format` (defaulting to `format`). Both templates are validated
    /// before any stream changes.
    pub fn update_format(&self, format: &str, file_format: Option<&str>) -> Result<()> {
        let console = Template::parse(format)?;
        let file = match file_format {
            Some(file_format) => Template::parse(file_format)?,
            None => console.clone(),
        };

        self.registry
            .update_where(true, |stream| stream.set_template(console.clone()));
        self.registry
            .update_where(false, |stream| stream.set_template(file.clone()));
        Ok(())
    }

    /// Register `stream`, replacing any stream with the same sink name
    pub fn add_stream(&self, stream: Arc<OutputStream>) -> Result<()> {
        if stream.is_released() {
            return Err(LoggerError::invalid_output_stream(
                stream.name(),
                "stream has been released",
            ));
        }
        self.registry.insert(stream);
        Ok(())
    }

    /// Unregister the stream with `stream`'s sink name and close its sink
    pub fn remove_stream(&self, stream: &OutputStream) -> Result<()> {
        if stream.is_released() {
            return Err(LoggerError::invalid_output_stream(
                stream.name(),
                "stream has already been removed",
            ));
        }

        if let Some(member) = self.registry.remove(stream.name()) {
            member.close()?;
        }
        stream.close()
    }

    /// `(number, name)` for every level, lowest first
    pub fn list_available_levels(&self) -> impl Iterator<Item = (u8, &'static str)> + Clone {
        LogLevel::ALL
            .into_iter()
            .map(|level| (level.number(), level.to_str()))
    }

    /// Block on a line from stdin when console output is at DEBUG
    pub fn hold(&self) -> Result<bool> {
        let stdin = std::io::stdin();
        let mut input = stdin.lock();
        self.hold_with(&mut input, &mut std::io::stdout())
    }

    /// [`hold`](Self::hold) against arbitrary input and output.
    /// Returns whether the handle waited.
    ///
    /// The gate follows the registry's console streams, so an `update_level`
    /// made through any handle applies. Without console streams the handle's
    /// own level is used.
    pub fn hold_with(&self, input: &mut impl BufRead, output: &mut impl Write) -> Result<bool> {
        let consoles = self.registry.console_streams();
        let at_debug = if consoles.is_empty() {
            self.level() == LogLevel::Debug
        } else {
            consoles.iter().any(|stream| stream.level() == LogLevel::Debug)
        };
        if !at_debug {
            return Ok(false);
        }

        write!(output, "{}", HOLD_PROMPT)?;
        output.flush()?;
        let mut line = String::new();
        input.read_line(&mut line)?;
        Ok(true)
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use multistream_logger::prelude::*;
    ///
    /// let logger = Logger::builder("worker")
    ///     .registry(StreamRegistry::shared())
    ///     .level(LogLevel::Debug)
    ///     .format("%a{levelname}% {message}")
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(logger.level(), LogLevel::Debug);
    /// ```
    #[must_use]
    pub fn builder(name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder::new(name)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("level", &self.level())
            .field("file_level", &self.file_level())
            .field("disable_file", &self.is_file_disabled())
            .field("log_file", &self.log_file)
            .finish()
    }
}

/// Builder for constructing Logger with a fluent API
pub struct LoggerBuilder {
    config: LoggerConfig,
    registry: Option<Arc<StreamRegistry>>,
    console_sink: Option<Box<dyn Sink>>,
}

impl LoggerBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_config(LoggerConfig::new(name))
    }

    pub fn from_config(config: LoggerConfig) -> Self {
        Self {
            config,
            registry: None,
            console_sink: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.config.format = Some(format.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn file_format(mut self, file_format: impl Into<String>) -> Self {
        self.config.file_format = Some(file_format.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.log_path = Some(path.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.config.level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn file_level(mut self, level: LogLevel) -> Self {
        self.config.file_level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn disable_file(mut self, disable_file: bool) -> Self {
        self.config.disable_file = disable_file;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn time_format(mut self, pattern: impl Into<String>) -> Self {
        self.config.time_format = Some(pattern.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn update_all(mut self, update_all: bool) -> Self {
        self.config.update_all = update_all;
        self
    }

    /// Join `registry` instead of the process-wide one
    #[must_use = "builder methods return a new value"]
    pub fn registry(mut self, registry: Arc<StreamRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Write console output to `sink` instead of stdout. Name the sink
    /// `<stdout>` or `<stderr>` for it to follow console-level updates.
    #[must_use = "builder methods return a new value"]
    pub fn console_sink(mut self, sink: impl Sink + 'static) -> Self {
        self.console_sink = Some(Box::new(sink));
        self
    }

    pub fn build(self) -> Result<Logger> {
        let registry = self.registry.unwrap_or_else(StreamRegistry::global);
        let console_sink = self
            .console_sink
            .unwrap_or_else(|| Box::new(ConsoleSink::stdout()));
        Logger::construct(self.config, registry, console_sink)
    }
}
