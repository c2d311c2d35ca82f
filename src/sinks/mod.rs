//! Sink implementations

pub mod console;
pub mod file;
pub mod memory;

pub use console::ConsoleSink;
pub use file::{resolve_log_path, FileSink};
pub use memory::{MemorySink, WriterSink};

pub use crate::core::Sink;
