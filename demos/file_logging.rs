//! File logging example
//!
//! Demonstrates two loggers sharing console and file streams, per-stream
//! levels, and adding a custom stream at runtime.
//!
//! Run with: cargo run --example file_logging

use multistream_logger::prelude::*;

fn main() -> Result<()> {
    println!("=== Multistream Logger - File Logging Example ===\n");

    // A directory path receives the default file name `log`
    let log_dir = std::env::temp_dir().join("multistream_logger_demo");
    let app = Logger::builder("app")
        .log_path(&log_dir)
        .file_level(LogLevel::Debug)
        .time_format("%Y-%m-%d %H:%M:%S")
        .build()?;

    println!("1. Logging to both console and file:");
    app.info("Application started");
    app.debug("Loading configuration... (file only)");
    app.warning("Using default settings for some options");

    println!("\n2. A second logger shares the same streams:");
    let db = Logger::builder("db").build()?;
    db.info("Connecting to database...");
    db.update_file_level("WARNING")?;
    app.info("Console only now that file level is WARNING");
    db.error("Failed to load optional plugin");

    println!("\n3. Adding an error-only stream on stderr:");
    let errors = OutputStream::builder(ConsoleSink::stderr())
        .level(LogLevel::Error)
        .format("%r!! {logger}% {message}")
        .build()?;
    app.add_stream(errors)?;
    app.error("Reported on stdout, stderr and the file");

    println!("\n4. Disabling the file:");
    app.update_disable_file(true);
    app.warning("Console only");

    println!("\n=== Example completed successfully! ===");
    if let Some(path) = app.log_file() {
        println!("Check '{}' for the file output", path.display());
    }

    Ok(())
}
