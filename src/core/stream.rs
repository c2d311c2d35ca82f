//! Output streams: one sink plus its own threshold, template and enabled flag

use super::caller::CallerInfo;
use super::color::{AnsiDecorator, Decorator, PlainDecorator};
use super::defaults::{is_console_name, DEFAULT_FILE_FORMAT};
use super::error::{LoggerError, Result};
use super::formatter::Template;
use super::log_entry::LogEntry;
use super::log_level::LogLevel;
use super::sink::Sink;
use super::timestamp::TimeFormat;
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone)]
struct StreamSettings {
    level: LogLevel,
    template: Template,
    disabled: bool,
    time_format: Option<TimeFormat>,
}

/// A configured output destination
///
/// Identity is the sink's name: two streams are equal when their sinks share a
/// name, whatever their level or template. Settings live behind a lock so that
/// every holder of the `Arc` observes updates on the next write.
pub struct OutputStream {
    name: String,
    sink: Mutex<Box<dyn Sink>>,
    settings: RwLock<StreamSettings>,
    decorator: Box<dyn Decorator>,
    released: AtomicBool,
}

impl OutputStream {
    /// Start building a stream over `sink`
    ///
    /// # Examples
    ///
    /// ```
    /// use multistream_logger::core::{LogLevel, OutputStream};
    /// use multistream_logger::sinks::MemorySink;
    ///
    /// let stream = OutputStream::builder(MemorySink::new("audit"))
    ///     .level(LogLevel::Warning)
    ///     .format("[{levelname}] {message}")
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(stream.name(), "audit");
    /// ```
    pub fn builder(sink: impl Sink + 'static) -> OutputStreamBuilder {
        Self::builder_boxed(Box::new(sink))
    }

    pub fn builder_boxed(sink: Box<dyn Sink>) -> OutputStreamBuilder {
        OutputStreamBuilder::new(sink)
    }

    /// Stream over `sink` with the default level and file template
    pub fn new(sink: impl Sink + 'static) -> Result<Arc<Self>> {
        Self::builder(sink).build()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this stream is routed by console-level updates
    pub fn is_console(&self) -> bool {
        is_console_name(&self.name)
    }

    pub fn level(&self) -> LogLevel {
        self.settings.read().level
    }

    pub fn format(&self) -> String {
        self.settings.read().template.as_str().to_string()
    }

    pub fn is_disabled(&self) -> bool {
        self.settings.read().disabled
    }

    pub fn time_format(&self) -> Option<TimeFormat> {
        self.settings.read().time_format.clone()
    }

    /// True once the sink has been closed
    pub fn is_released(&self) -> bool {
        self.released.load(Ordering::Acquire)
    }

    pub fn set_level(&self, level: LogLevel) {
        self.settings.write().level = level;
    }

    pub fn set_level_name(&self, name: &str) -> Result<()> {
        self.set_level(name.parse()?);
        Ok(())
    }

    pub fn set_format(&self, format: &str) -> Result<()> {
        self.set_template(Template::parse(format)?);
        Ok(())
    }

    pub fn set_template(&self, template: Template) {
        self.settings.write().template = template;
    }

    pub fn set_disabled(&self, disabled: bool) {
        self.settings.write().disabled = disabled;
    }

    /// Override the `{time}` pattern; `None` restores the default
    pub fn set_time_format(&self, pattern: Option<&str>) -> Result<()> {
        let time_format = pattern.map(TimeFormat::new).transpose()?;
        self.settings.write().time_format = time_format;
        Ok(())
    }

    /// Gate, format and write one message
    ///
    /// Returns `Ok(false)` without touching the sink when the stream is
    /// disabled, released, or `level` is below the threshold.
    pub fn write(
        &self,
        message: &str,
        level: LogLevel,
        caller: &CallerInfo,
        logger: &str,
    ) -> Result<bool> {
        self.write_entry(&LogEntry::new(level, message, logger, caller.clone()))
    }

    pub fn write_entry(&self, entry: &LogEntry) -> Result<bool> {
        if self.is_released() {
            return Ok(false);
        }

        let line = {
            let settings = self.settings.read();
            if settings.disabled || entry.level < settings.level {
                return Ok(false);
            }

            let default_format;
            let time_format = match &settings.time_format {
                Some(time_format) => time_format,
                None => {
                    default_format = TimeFormat::default();
                    &default_format
                }
            };
            let mut line = settings
                .template
                .render(entry, time_format, self.decorator.as_ref());
            line.push('\n');
            line
        };

        self.sink.lock().write(&line)?;
        Ok(true)
    }

    /// Close the sink. Closing twice is a no-op.
    pub fn close(&self) -> Result<()> {
        if self.released.swap(true, Ordering::AcqRel) {
            return Ok(());
        }
        self.sink.lock().close()
    }
}

impl PartialEq for OutputStream {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for OutputStream {}

impl Hash for OutputStream {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Debug for OutputStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let settings = self.settings.read();
        f.debug_struct("OutputStream")
            .field("name", &self.name)
            .field("level", &settings.level)
            .field("format", &settings.template.as_str())
            .field("disabled", &settings.disabled)
            .field("released", &self.is_released())
            .finish()
    }
}

/// Builder for [`OutputStream`]
pub struct OutputStreamBuilder {
    sink: Box<dyn Sink>,
    level: LogLevel,
    level_name: Option<String>,
    format: Option<String>,
    template: Option<Template>,
    time_format: Option<String>,
    disabled: bool,
    decorator: Option<Box<dyn Decorator>>,
}

impl OutputStreamBuilder {
    pub fn new(sink: Box<dyn Sink>) -> Self {
        Self {
            sink,
            level: LogLevel::Info,
            level_name: None,
            format: None,
            template: None,
            time_format: None,
            disabled: false,
            decorator: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self.level_name = None;
        self
    }

    /// Set the level by name; an unknown name fails the build with `InvalidLevel`
    #[must_use = "builder methods return a new value"]
    pub fn level_name(mut self, name: impl Into<String>) -> Self {
        self.level_name = Some(name.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self.template = None;
        self
    }

    /// Use an already compiled template
    #[must_use = "builder methods return a new value"]
    pub fn template(mut self, template: Template) -> Self {
        self.template = Some(template);
        self.format = None;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn time_format(mut self, pattern: impl Into<String>) -> Self {
        self.time_format = Some(pattern.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Replace the decoration chosen from the sink's colour support
    #[must_use = "builder methods return a new value"]
    pub fn decorator(mut self, decorator: impl Decorator + 'static) -> Self {
        self.decorator = Some(Box::new(decorator));
        self
    }

    pub fn build(self) -> Result<Arc<OutputStream>> {
        let name = self.sink.name().to_string();
        if name.is_empty() {
            return Err(LoggerError::invalid_stream(name, "sink has no name"));
        }
        if !self.sink.is_writable() {
            return Err(LoggerError::invalid_stream(name, "sink is not writable"));
        }

        let level = match self.level_name {
            Some(level_name) => level_name.parse::<LogLevel>()?,
            None => self.level,
        };
        let template = match self.template {
            Some(template) => template,
            None => Template::parse(self.format.as_deref().unwrap_or(DEFAULT_FILE_FORMAT))?,
        };
        let time_format = self.time_format.map(TimeFormat::new).transpose()?;

        let decorator = match self.decorator {
            Some(decorator) => decorator,
            None if self.sink.supports_color() => Box::new(AnsiDecorator),
            None => Box::new(PlainDecorator),
        };

        Ok(Arc::new(OutputStream {
            name,
            sink: Mutex::new(self.sink),
            settings: RwLock::new(StreamSettings {
                level,
                template,
                disabled: self.disabled,
                time_format,
            }),
            decorator,
            released: AtomicBool::new(false),
        }))
    }
}
