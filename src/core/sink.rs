//! Sink trait for log output destinations

use super::error::Result;

/// A writable, named text destination
///
/// The name is the sink's identity: streams over sinks with equal names are
/// treated as the same stream by the registry.
pub trait Sink: Send {
    /// Write `text` in one call. The text already carries its line terminator.
    fn write(&mut self, text: &str) -> Result<()>;

    fn name(&self) -> &str;

    /// Release the underlying handle. Writes after closing fail.
    fn close(&mut self) -> Result<()> {
        Ok(())
    }

    fn is_writable(&self) -> bool {
        true
    }

    /// Whether colour runs should be rendered as terminal escapes
    fn supports_color(&self) -> bool {
        false
    }
}
