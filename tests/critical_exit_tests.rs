//! Tests for the fatal `critical` path
//!
//! These tests verify:
//! - Critical messages reach every stream before the process exits
//! - The exit code defaults to 1 and can be chosen by the caller
//!
//! Each case re-runs this test binary with `CRITICAL_MODE_ENV` set, so the
//! `critical_child` test performs the exit in a separate process.

use multistream_logger::core::defaults::STDOUT_NAME;
use multistream_logger::critical;
use multistream_logger::prelude::*;
use std::env;
use std::fs;
use std::process::{Command, Stdio};
use tempfile::TempDir;

const CRITICAL_MODE_ENV: &str = "MULTISTREAM_LOGGER_CRITICAL_MODE";
const CRITICAL_LOG_ENV: &str = "MULTISTREAM_LOGGER_CRITICAL_LOG";

/// Runs only inside the child process
#[test]
fn critical_child() {
    let (Ok(mode), Ok(log_path)) = (env::var(CRITICAL_MODE_ENV), env::var(CRITICAL_LOG_ENV))
    else {
        return;
    };

    let logger = Logger::builder("fatal")
        .registry(StreamRegistry::shared())
        .console_sink(MemorySink::new(STDOUT_NAME))
        .log_path(log_path)
        .file_format("{levelname} {logger}")
        .build()
        .expect("Failed to build logger");

    match mode.as_str() {
        "with_code" => logger.critical_with_code("shutting down", 3),
        "default" => logger.critical("shutting down"),
        "args" => logger.critical_args("shutting", &[&"down"], 4),
        "macro_code" => critical!(logger, code = 5; "shutting {}", "down"),
        "macro_default" => critical!(logger, "shutting {}", "down"),
        other => panic!("unknown mode {}", other),
    }
}

fn run_child(mode: &str) -> (Option<i32>, String) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("fatal.log");

    let status = Command::new(env::current_exe().expect("Failed to locate test binary"))
        .args(["critical_child", "--exact", "--test-threads=1"])
        .env(CRITICAL_MODE_ENV, mode)
        .env(CRITICAL_LOG_ENV, &log_file)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .expect("Failed to run child process");

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    (status.code(), content)
}

#[test]
fn test_critical_with_code_exits_with_code() {
    let (code, content) = run_child("with_code");
    assert_eq!(code, Some(3));
    assert_eq!(content, "CRITICAL fatal shutting down\n");
}

#[test]
fn test_critical_exits_with_default_code() {
    let (code, content) = run_child("default");
    assert_eq!(code, Some(1));
    assert_eq!(content, "CRITICAL fatal shutting down\n");
}

#[test]
fn test_critical_args_joins_before_exit() {
    let (code, content) = run_child("args");
    assert_eq!(code, Some(4));
    assert_eq!(content, "CRITICAL fatal shutting down\n");
}

#[test]
fn test_critical_macro_exit_codes() {
    let (code, content) = run_child("macro_code");
    assert_eq!(code, Some(5));
    assert_eq!(content, "CRITICAL fatal shutting down\n");

    let (code, content) = run_child("macro_default");
    assert_eq!(code, Some(1));
    assert_eq!(content, "CRITICAL fatal shutting down\n");
}
