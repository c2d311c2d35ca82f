//! Basic logger usage example
//!
//! Demonstrates console logging, level thresholds, templates and colour runs.
//!
//! Run with: cargo run --example basic_usage

use multistream_logger::prelude::*;
use multistream_logger::{info, warning};

fn main() -> Result<()> {
    println!("=== Multistream Logger - Basic Usage Example ===\n");

    // Console logger on the process-wide registry
    let logger = Logger::builder("basic").level(LogLevel::Debug).build()?;

    println!("1. Logging at different levels:");
    logger.debug("This is a debug message");
    logger.info("This is an info message");
    logger.warning("This is a warning message");
    logger.error("This is an error message");

    println!("\n2. Raising the console level to WARNING:");
    logger.update_level("WARNING")?;
    logger.debug("Debug message (hidden)");
    logger.info("Info message (hidden)");
    logger.warning("Warning message (visible)");

    println!("\n3. Custom template with colour runs:");
    logger.update_level("DEBUG")?;
    logger.update_format("%a{levelname}% %c{funcname}:{lineno}% {logger} ->", None)?;
    info!(logger, "Macros record the enclosing function");
    warning!(logger, "Disk usage at {}%", 91);

    println!("\n4. Extra arguments are joined with spaces:");
    logger.log_args(LogLevel::Info, "user", &[&"alice", &"logged in from", &"10.0.0.7"]);

    println!("\n5. Available levels:");
    for (number, name) in logger.list_available_levels() {
        println!("   {} = {}", number, name);
    }

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
