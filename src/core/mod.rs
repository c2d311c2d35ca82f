//! Core logger types and traits

pub mod caller;
pub mod color;
pub mod config;
pub mod defaults;
pub mod error;
pub mod formatter;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod registry;
pub mod sink;
pub mod stream;
pub mod timestamp;

pub use caller::CallerInfo;
pub use color::{AnsiDecorator, ColorTag, Decorator, PlainDecorator};
pub use config::LoggerConfig;
pub use error::{LoggerError, Result};
pub use formatter::{substitute, Field, Template};
pub use log_entry::{compose_message, LogEntry};
pub use log_level::{level_name, level_number, LogLevel};
pub use logger::{Logger, LoggerBuilder, HOLD_PROMPT};
pub use metrics::RegistryMetrics;
pub use registry::StreamRegistry;
pub use sink::Sink;
pub use stream::{OutputStream, OutputStreamBuilder};
pub use timestamp::TimeFormat;
