//! File sink implementation

use crate::core::defaults::DEFAULT_LOG_FILENAME;
use crate::core::{LoggerError, Result, Sink};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Append-only file sink, named by its path
pub struct FileSink {
    file: Option<File>,
    path: PathBuf,
    name: String,
}

impl FileSink {
    /// Open `path` for appending, creating the file and its parents if needed
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                LoggerError::io_operation(
                    "creating log directory",
                    format!("cannot create '{}'", parent.display()),
                    e,
                )
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                LoggerError::io_operation(
                    "opening log file",
                    format!("cannot open '{}'", path.display()),
                    e,
                )
            })?;

        Ok(Self {
            file: Some(file),
            name: path.display().to_string(),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Sink for FileSink {
    fn write(&mut self, text: &str) -> Result<()> {
        let file = self
            .file
            .as_mut()
            .ok_or_else(|| LoggerError::writer(format!("File '{}' is closed", self.name)))?;
        file.write_all(text.as_bytes())?;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn close(&mut self) -> Result<()> {
        if let Some(mut file) = self.file.take() {
            file.flush()?;
        }
        Ok(())
    }

    fn is_writable(&self) -> bool {
        self.file.is_some()
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

/// Expand a leading `~` to the user's home directory
///
/// Fails when the path starts with `~` and no home directory can be found.
pub fn expand_home(path: &Path) -> Result<PathBuf> {
    let Ok(rest) = path.strip_prefix("~") else {
        return Ok(path.to_path_buf());
    };
    let home = dirs::home_dir().ok_or_else(|| {
        LoggerError::io_operation(
            "expanding log path",
            format!("cannot resolve '{}'", path.display()),
            std::io::Error::new(std::io::ErrorKind::NotFound, "home directory not found"),
        )
    })?;
    Ok(home.join(rest))
}

/// Resolve a configured log path to a concrete, existing file
///
/// Directories get [`DEFAULT_LOG_FILENAME`] appended. Missing parents and an
/// empty file are created.
pub fn resolve_log_path(path: impl AsRef<Path>) -> Result<PathBuf> {
    let mut path = expand_home(path.as_ref())?;
    if path.is_dir() {
        path.push(DEFAULT_LOG_FILENAME);
    }

    if !path.exists() {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                LoggerError::io_operation(
                    "creating log directory",
                    format!("cannot create '{}'", parent.display()),
                    e,
                )
            })?;
        }
        File::create(&path).map_err(|e| {
            LoggerError::io_operation(
                "creating log file",
                format!("cannot create '{}'", path.display()),
                e,
            )
        })?;
    }

    Ok(path)
}
