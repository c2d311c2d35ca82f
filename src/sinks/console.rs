//! Console sink implementation

use crate::core::defaults::{STDERR_NAME, STDOUT_NAME};
use crate::core::{Result, Sink};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Stdout,
    Stderr,
}

pub struct ConsoleSink {
    target: Target,
    use_colors: bool,
}

impl ConsoleSink {
    pub fn stdout() -> Self {
        Self {
            target: Target::Stdout,
            use_colors: colored::control::SHOULD_COLORIZE.should_colorize(),
        }
    }

    pub fn stderr() -> Self {
        Self {
            target: Target::Stderr,
            use_colors: colored::control::SHOULD_COLORIZE.should_colorize(),
        }
    }

    /// Force colour escapes on or off regardless of the terminal
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }
}

impl Sink for ConsoleSink {
    fn write(&mut self, text: &str) -> Result<()> {
        match self.target {
            Target::Stdout => {
                let mut out = std::io::stdout().lock();
                out.write_all(text.as_bytes())?;
                out.flush()?;
            }
            Target::Stderr => {
                let mut out = std::io::stderr().lock();
                out.write_all(text.as_bytes())?;
                out.flush()?;
            }
        }
        Ok(())
    }

    fn name(&self) -> &str {
        match self.target {
            Target::Stdout => STDOUT_NAME,
            Target::Stderr => STDERR_NAME,
        }
    }

    fn close(&mut self) -> Result<()> {
        // The process owns stdio; only flush
        match self.target {
            Target::Stdout => std::io::stdout().flush()?,
            Target::Stderr => std::io::stderr().flush()?,
        }
        Ok(())
    }

    fn supports_color(&self) -> bool {
        self.use_colors
    }
}
