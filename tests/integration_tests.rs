//! Integration tests for the logger system
//!
//! These tests verify:
//! - File output layout and default file naming
//! - Cross-handle updates through a shared registry
//! - Stream removal while other handles keep logging
//! - Per-stream level gating and templates

use multistream_logger::core::defaults::STDOUT_NAME;
use multistream_logger::prelude::*;
use multistream_logger::sinks::WriterSink;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

fn quiet_logger(name: &str, registry: &Arc<StreamRegistry>) -> LoggerBuilder {
    Logger::builder(name)
        .registry(Arc::clone(registry))
        .console_sink(MemorySink::new(STDOUT_NAME))
}

#[test]
fn test_file_output_layout() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("app.log");
    let registry = StreamRegistry::shared();

    let logger = quiet_logger("files", &registry)
        .log_path(&log_file)
        .file_format("[{levelname}] {logger} {message}")
        .build()
        .expect("Failed to build logger");

    logger.debug("first");
    logger.info("second");
    logger.error("third");

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    assert_eq!(
        content,
        "[DEBUG] files first\n[INFO] files second\n[ERROR] files third\n"
    );
}

#[test]
fn test_default_file_format_records_call_site() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let registry = StreamRegistry::shared();

    let logger = quiet_logger("site", &registry)
        .log_path(temp_dir.path())
        .time_format("%Y")
        .build()
        .expect("Failed to build logger");

    logger.warning("look here");

    let log_file = temp_dir.path().join("log");
    assert_eq!(logger.log_file(), Some(log_file.as_path()));

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let line = content.lines().next().expect("one line");
    assert!(line.starts_with("[WARNING] ["));
    assert!(line.contains(&format!("[{}]", file!())));
    assert!(line.ends_with(" look here"));
}

#[test]
fn test_existing_file_is_appended() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("keep.log");
    fs::write(&log_file, "old line\n").unwrap();
    let registry = StreamRegistry::shared();

    let logger = quiet_logger("append", &registry)
        .log_path(&log_file)
        .file_format("{message}")
        .build()
        .unwrap();
    logger.info("new line");

    assert_eq!(fs::read_to_string(&log_file).unwrap(), "old line\nnew line\n");
}

#[test]
fn test_missing_log_path_means_no_file() {
    let registry = StreamRegistry::shared();
    let logger = quiet_logger("nofile", &registry)
        .disable_file(false)
        .build()
        .unwrap();

    assert!(logger.log_file().is_none());
    assert!(logger.is_file_disabled());
    assert!(registry.file_streams().is_empty());
}

#[test]
fn test_update_level_seen_from_other_handle() {
    let registry = StreamRegistry::shared();
    let first = quiet_logger("test1", &registry)
        .level(LogLevel::Info)
        .build()
        .unwrap();
    let second = quiet_logger("test2", &registry)
        .level(LogLevel::Warning)
        .build()
        .unwrap();

    second.update_level("DEBUG").unwrap();

    for stream in first.streams().iter().filter(|s| s.is_console()) {
        assert_eq!(stream.level(), LogLevel::Debug);
    }
}

#[test]
fn test_update_disable_file_across_handles() {
    let temp_dir = TempDir::new().unwrap();
    let registry = StreamRegistry::shared();
    let first = quiet_logger("test1", &registry)
        .log_path(temp_dir.path().join("one.log"))
        .disable_file(false)
        .build()
        .unwrap();
    let second = quiet_logger("test2", &registry)
        .log_path(temp_dir.path().join("two.log"))
        .disable_file(true)
        .build()
        .unwrap();

    second.update_disable_file(true);
    first.info("dropped");

    assert!(second.is_file_disabled());
    assert!(registry.file_streams().iter().all(|s| s.is_disabled()));
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("one.log")).unwrap(),
        ""
    );
}

#[test]
fn test_remove_stream_then_log_from_other_handle() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("test.txt");
    let registry = StreamRegistry::shared();

    let first = quiet_logger("test1", &registry)
        .log_path(&file_path)
        .build()
        .unwrap();
    let second = quiet_logger("test2", &registry).build().unwrap();

    let file_stream = registry
        .get(&file_path.display().to_string())
        .expect("file stream registered");
    first.remove_stream(&file_stream).unwrap();

    assert_eq!(first.streams().len(), 1);
    assert_eq!(second.error("after removal"), 1);
    assert_eq!(fs::read_to_string(&file_path).unwrap(), "");
}

#[test]
fn test_duplicate_identity_updated_once() {
    let registry = StreamRegistry::shared();
    let logger = quiet_logger("dups", &registry).build().unwrap();

    let kept = MemorySink::new("shared-sink");
    logger
        .add_stream(OutputStream::builder(MemorySink::new("shared-sink")).build().unwrap())
        .unwrap();
    logger
        .add_stream(OutputStream::builder(kept.clone()).build().unwrap())
        .unwrap();

    assert_eq!(registry.len(), 2);
    logger.update_format("{levelname}:", None).unwrap();
    logger.update_file_level("DEBUG").unwrap();
    logger.debug("once");

    assert_eq!(kept.lines(), vec!["DEBUG: once"]);
}

#[test]
fn test_placeholder_free_template() {
    let registry = StreamRegistry::shared();
    let sink = MemorySink::new("plain");
    let logger = quiet_logger("plain", &registry).build().unwrap();
    logger
        .add_stream(OutputStream::builder(sink.clone()).format("nana").build().unwrap())
        .unwrap();

    logger.info("message");
    assert_eq!(sink.contents(), "nana message\n");
}

#[test]
fn test_custom_writer_sink() {
    let registry = StreamRegistry::shared();
    let logger = quiet_logger("writer", &registry).build().unwrap();
    let stream = OutputStream::builder(WriterSink::new("buffer", Vec::new()))
        .level(LogLevel::Error)
        .format("{levelno} {message}")
        .build()
        .unwrap();
    logger.add_stream(Arc::clone(&stream)).unwrap();

    assert_eq!(logger.warning("skipped"), 1);
    assert_eq!(logger.error("kept"), 2);
    assert_eq!(registry.metrics().lines_written(), 3);
    assert_eq!(registry.metrics().lines_filtered(), 1);
}

#[test]
fn test_config_from_json() {
    let temp_dir = TempDir::new().unwrap();
    let log_file = temp_dir.path().join("cfg.log");
    let json = format!(
        r#"{{
            "name": "configured",
            "log_path": {},
            "file_format": "{{logger}}|{{levelname}}|{{message}}",
            "file_level": "WARNING"
        }}"#,
        serde_json::to_string(&log_file).unwrap()
    );
    let config = LoggerConfig::from_json(&json).unwrap();
    let registry = StreamRegistry::shared();

    let logger = LoggerBuilder::from_config(config)
        .registry(Arc::clone(&registry))
        .console_sink(MemorySink::new(STDOUT_NAME))
        .build()
        .unwrap();
    logger.info("hidden");
    logger.warning("shown");

    let content = fs::read_to_string(&log_file).unwrap();
    assert_eq!(content, "configured|WARNING|shown\n");
}

#[test]
fn test_default_registry_is_process_wide() {
    let first = Logger::builder("global-a")
        .console_sink(MemorySink::new(STDOUT_NAME))
        .build()
        .unwrap();
    let second = Logger::builder("global-b")
        .console_sink(MemorySink::new(STDOUT_NAME))
        .build()
        .unwrap();

    assert!(Arc::ptr_eq(first.registry(), second.registry()));
    assert!(Arc::ptr_eq(first.registry(), &StreamRegistry::global()));
}
