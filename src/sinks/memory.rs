//! In-memory and generic writer sinks

use crate::core::{LoggerError, Result, Sink};
use parking_lot::Mutex;
use std::io::Write;
use std::sync::Arc;

/// Collects written lines in a shared buffer
///
/// Clones share the buffer, so a clone kept by the caller sees every line the
/// registered sink receives.
///
/// # Examples
///
/// ```
/// use multistream_logger::sinks::MemorySink;
/// use multistream_logger::core::Sink;
///
/// let mut sink = MemorySink::new("capture");
/// let view = sink.clone();
/// sink.write("hello\n").unwrap();
/// assert_eq!(view.lines(), vec!["hello".to_string()]);
/// ```
#[derive(Clone)]
pub struct MemorySink {
    name: String,
    buffer: Arc<Mutex<String>>,
    closed: Arc<Mutex<bool>>,
}

impl MemorySink {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            buffer: Arc::new(Mutex::new(String::new())),
            closed: Arc::new(Mutex::new(false)),
        }
    }

    /// Everything written so far
    pub fn contents(&self) -> String {
        self.buffer.lock().clone()
    }

    pub fn lines(&self) -> Vec<String> {
        self.buffer.lock().lines().map(String::from).collect()
    }

    pub fn is_closed(&self) -> bool {
        *self.closed.lock()
    }
}

impl Sink for MemorySink {
    fn write(&mut self, text: &str) -> Result<()> {
        if self.is_closed() {
            return Err(LoggerError::writer(format!("Sink '{}' is closed", self.name)));
        }
        self.buffer.lock().push_str(text);
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn close(&mut self) -> Result<()> {
        *self.closed.lock() = true;
        Ok(())
    }

    fn is_writable(&self) -> bool {
        !self.is_closed()
    }
}

/// Adapts any `io::Write` into a named sink
pub struct WriterSink<W: Write + Send> {
    name: String,
    writer: Option<W>,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(name: impl Into<String>, writer: W) -> Self {
        Self {
            name: name.into(),
            writer: Some(writer),
        }
    }

    /// Take the writer back, closing the sink
    pub fn into_inner(mut self) -> Option<W> {
        self.writer.take()
    }
}

impl<W: Write + Send> Sink for WriterSink<W> {
    fn write(&mut self, text: &str) -> Result<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| LoggerError::writer(format!("Sink '{}' is closed", self.name)))?;
        writer.write_all(text.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn close(&mut self) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush()?;
        }
        Ok(())
    }

    fn is_writable(&self) -> bool {
        self.writer.is_some()
    }
}
