//! # Multistream Logger
//!
//! A minimal, synchronous logging library. Named [`Logger`] handles emit
//! leveled messages; each message is routed to every [`OutputStream`] in a
//! shared [`StreamRegistry`], and each stream applies its own level threshold
//! and text template before writing a line to its sink.
//!
//! ## Features
//!
//! - **Independent streams**: console, file and custom sinks, each with its own level and template
//! - **Shared registry**: updates made through one logger reach streams created by others
//! - **Templates**: `{time}`, `{filename}`, `{funcname}`, `{lineno}`, `{levelname}`, `{levelno}`, `{logger}`, `{message}`
//! - **Colour runs**: `%g...%` or `%a...%` (colour from the level) on terminals
//!
//! ```
//! use multistream_logger::prelude::*;
//! use multistream_logger::sinks::MemorySink;
//!
//! let registry = StreamRegistry::shared();
//! let logger = Logger::builder("app").registry(registry.clone()).build().unwrap();
//!
//! let audit = MemorySink::new("audit");
//! logger
//!     .add_stream(
//!         OutputStream::builder(audit.clone())
//!             .level(LogLevel::Warning)
//!             .format("[{levelname}] {logger}:")
//!             .build()
//!             .unwrap(),
//!     )
//!     .unwrap();
//!
//! logger.info("not audited");
//! logger.warning("disk almost full");
//! assert_eq!(audit.lines(), vec!["[WARNING] app: disk almost full"]);
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        CallerInfo, LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerError, OutputStream,
        Result, Sink, StreamRegistry, Template,
    };
    pub use crate::sinks::{ConsoleSink, FileSink, MemorySink};
}

pub use crate::core::{
    level_name, level_number, substitute, CallerInfo, LogLevel, Logger, LoggerBuilder,
    LoggerConfig, LoggerError, OutputStream, RegistryMetrics, Result, Sink, StreamRegistry,
    Template, TimeFormat,
};
pub use crate::sinks::{ConsoleSink, FileSink, MemorySink, WriterSink};
