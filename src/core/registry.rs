//! Shared stream registry
//!
//! Loggers do not own their streams. Every logger built against the same
//! registry writes to, and updates, the same set of [`OutputStream`]s. Members
//! are unique by sink name; inserting a stream whose name is already present
//! replaces the existing member in place.

use super::log_entry::LogEntry;
use super::metrics::RegistryMetrics;
use super::stream::OutputStream;
use parking_lot::RwLock;
use std::sync::{Arc, OnceLock};

static GLOBAL_REGISTRY: OnceLock<Arc<StreamRegistry>> = OnceLock::new();

#[derive(Debug, Default)]
pub struct StreamRegistry {
    streams: RwLock<Vec<Arc<OutputStream>>>,
    metrics: RegistryMetrics,
}

impl StreamRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh registry ready to hand to several loggers
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// The process-wide registry used by loggers built without an explicit one
    pub fn global() -> Arc<Self> {
        Arc::clone(GLOBAL_REGISTRY.get_or_init(StreamRegistry::shared))
    }

    /// Insert `stream`, replacing any member with the same name.
    /// Returns the replaced member.
    pub fn insert(&self, stream: Arc<OutputStream>) -> Option<Arc<OutputStream>> {
        let mut streams = self.streams.write();
        match streams.iter_mut().find(|existing| existing.name() == stream.name()) {
            Some(existing) => Some(std::mem::replace(existing, stream)),
            None => {
                streams.push(stream);
                None
            }
        }
    }

    pub fn remove(&self, name: &str) -> Option<Arc<OutputStream>> {
        let mut streams = self.streams.write();
        let idx = streams.iter().position(|stream| stream.name() == name)?;
        Some(streams.remove(idx))
    }

    pub fn get(&self, name: &str) -> Option<Arc<OutputStream>> {
        self.streams
            .read()
            .iter()
            .find(|stream| stream.name() == name)
            .cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.streams.read().iter().any(|stream| stream.name() == name)
    }

    /// Snapshot of the members in insertion order
    pub fn streams(&self) -> Vec<Arc<OutputStream>> {
        self.streams.read().clone()
    }

    pub fn console_streams(&self) -> Vec<Arc<OutputStream>> {
        self.filtered(true)
    }

    pub fn file_streams(&self) -> Vec<Arc<OutputStream>> {
        self.filtered(false)
    }

    fn filtered(&self, console: bool) -> Vec<Arc<OutputStream>> {
        self.streams
            .read()
            .iter()
            .filter(|stream| stream.is_console() == console)
            .cloned()
            .collect()
    }

    /// Apply `update` to every console stream, or every other stream when
    /// `console` is false
    pub fn update_where(&self, console: bool, update: impl Fn(&OutputStream)) {
        for stream in self.streams.read().iter() {
            if stream.is_console() == console {
                update(stream);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.streams.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.streams.read().is_empty()
    }

    /// Drop every member without closing their sinks
    pub fn clear(&self) {
        self.streams.write().clear();
    }

    pub fn metrics(&self) -> &RegistryMetrics {
        &self.metrics
    }

    /// Offer `entry` to every member, isolating failures per stream
    ///
    /// A sink error or panic is reported on stderr and counted; the remaining
    /// streams still receive the entry. Returns how many streams wrote it.
    pub fn dispatch(&self, entry: &LogEntry) -> usize {
        let streams = self.streams.read();
        let mut written = 0;

        for stream in streams.iter() {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                stream.write_entry(entry)
            }));

            match result {
                Ok(Ok(true)) => {
                    self.metrics.record_written();
                    written += 1;
                }
                Ok(Ok(false)) => {
                    self.metrics.record_filtered();
                }
                Ok(Err(e)) => {
                    self.metrics.record_failed();
                    eprintln!("[LOGGER ERROR] Stream '{}' failed: {}", stream.name(), e);
                }
                Err(panic_info) => {
                    self.metrics.record_failed();
                    let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                        s.to_string()
                    } else if let Some(s) = panic_info.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "Unknown panic".to_string()
                    };
                    eprintln!(
                        "[LOGGER CRITICAL] Stream '{}' panicked: {}. \
                         Other streams continue to function.",
                        stream.name(),
                        panic_msg
                    );
                }
            }
        }

        written
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CallerInfo, LogLevel, LoggerError, Result, Sink};
    use crate::sinks::MemorySink;

    fn memory_stream(name: &str, level: LogLevel) -> (Arc<OutputStream>, MemorySink) {
        let sink = MemorySink::new(name);
        let stream = OutputStream::builder(sink.clone())
            .level(level)
            .format("{message}")
            .build()
            .unwrap();
        (stream, sink)
    }

    fn entry(level: LogLevel, message: &str) -> LogEntry {
        LogEntry::new(level, message, "reg", CallerInfo::new("r.rs", 1, "f"))
    }

    #[test]
    fn test_same_name_collapses() {
        let registry = StreamRegistry::new();
        let (first, _) = memory_stream("dup", LogLevel::Debug);
        let (second, _) = memory_stream("dup", LogLevel::Error);

        assert!(registry.insert(first).is_none());
        let replaced = registry.insert(Arc::clone(&second)).unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(replaced.level(), LogLevel::Debug);
        assert!(Arc::ptr_eq(&registry.get("dup").unwrap(), &second));
    }

    #[test]
    fn test_insertion_order_preserved_on_replace() {
        let registry = StreamRegistry::new();
        registry.insert(memory_stream("a", LogLevel::Info).0);
        registry.insert(memory_stream("b", LogLevel::Info).0);
        registry.insert(memory_stream("a", LogLevel::Error).0);

        let names: Vec<String> = registry.streams().iter().map(|s| s.name().to_string()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_dispatch_respects_each_gate() {
        let registry = StreamRegistry::new();
        let (verbose_stream, verbose) = memory_stream("verbose", LogLevel::Debug);
        let (quiet_stream, quiet) = memory_stream("quiet", LogLevel::Error);
        registry.insert(verbose_stream);
        registry.insert(quiet_stream);

        assert_eq!(registry.dispatch(&entry(LogLevel::Info, "one")), 1);
        assert_eq!(registry.dispatch(&entry(LogLevel::Error, "two")), 2);

        assert_eq!(verbose.lines(), vec!["one", "two"]);
        assert_eq!(quiet.lines(), vec!["two"]);
        assert_eq!(registry.metrics().lines_written(), 3);
        assert_eq!(registry.metrics().lines_filtered(), 1);
    }

    #[test]
    fn test_removed_stream_is_skipped() {
        let registry = StreamRegistry::new();
        let (stream, sink) = memory_stream("gone", LogLevel::Debug);
        registry.insert(stream);

        assert!(registry.remove("gone").is_some());
        assert!(registry.remove("gone").is_none());
        assert_eq!(registry.dispatch(&entry(LogLevel::Critical, "x")), 0);
        assert!(sink.contents().is_empty());
    }

    struct FailingSink;

    impl Sink for FailingSink {
        fn write(&mut self, _text: &str) -> Result<()> {
            Err(LoggerError::writer("Simulated failure"))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    struct PanickingSink;

    impl Sink for PanickingSink {
        fn write(&mut self, _text: &str) -> Result<()> {
            panic!("sink exploded");
        }

        fn name(&self) -> &str {
            "panicking"
        }
    }

    #[test]
    fn test_failures_are_isolated() {
        let registry = StreamRegistry::new();
        registry.insert(OutputStream::new(FailingSink).unwrap());
        registry.insert(OutputStream::new(PanickingSink).unwrap());
        let (stream, sink) = memory_stream("healthy", LogLevel::Debug);
        registry.insert(stream);

        assert_eq!(registry.dispatch(&entry(LogLevel::Error, "still here")), 1);
        assert_eq!(sink.lines(), vec!["still here"]);
        assert_eq!(registry.metrics().write_failures(), 2);
    }

    #[test]
    fn test_update_where_splits_console_and_files() {
        let registry = StreamRegistry::new();
        let console = OutputStream::builder(crate::sinks::ConsoleSink::stdout())
            .level(LogLevel::Info)
            .build()
            .unwrap();
        registry.insert(Arc::clone(&console));
        let (file_like, _) = memory_stream("app.log", LogLevel::Info);
        registry.insert(Arc::clone(&file_like));

        registry.update_where(true, |stream| stream.set_level(LogLevel::Critical));

        assert_eq!(console.level(), LogLevel::Critical);
        assert_eq!(file_like.level(), LogLevel::Info);
        assert_eq!(registry.console_streams().len(), 1);
        assert_eq!(registry.file_streams().len(), 1);
    }

    #[test]
    fn test_global_is_shared() {
        assert!(Arc::ptr_eq(&StreamRegistry::global(), &StreamRegistry::global()));
    }
}
