//! Tracing subscriber setup
//!
//! The dashboard owns the terminal, so it logs to a file in the platform data
//! directory (`~/.local/share/weatherdash/` on Linux). One-shot runs log to
//! stderr. The filter is read from `WEATHERDASH_LOG` and defaults to `info`.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use directories::ProjectDirs;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive
pub const LOG_ENV: &str = "WEATHERDASH_LOG";

/// Name of the log file inside the log directory
pub const LOG_FILE: &str = "weatherdash.log";

/// Errors that can occur while installing the log subscriber
#[derive(Debug, Error)]
pub enum LoggingError {
    /// No home directory to place the log file in
    #[error("Could not determine a directory for the log file")]
    NoLogDir,

    /// The log file could not be created
    #[error("Failed to open log file: {0}")]
    Io(#[from] io::Error),

    /// A global subscriber is already installed
    #[error("Failed to install log subscriber: {0}")]
    Install(String),
}

/// Default directory for the dashboard's log file
pub fn default_log_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "weatherdash").map(|dirs| dirs.data_local_dir().to_path_buf())
}

/// Filter from `WEATHERDASH_LOG`, falling back to `info`
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Create the log directory and open the log file for appending
pub fn open_log_file(dir: &Path) -> Result<(PathBuf, File), LoggingError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    Ok((path, file))
}

/// Log to a file in `dir`, or the default log directory when `None`
///
/// Returns the path of the log file.
pub fn init_file(dir: Option<&Path>) -> Result<PathBuf, LoggingError> {
    let dir = match dir {
        Some(dir) => dir.to_path_buf(),
        None => default_log_dir().ok_or(LoggingError::NoLogDir)?,
    };
    let (path, file) = open_log_file(&dir)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| LoggingError::Install(e.to_string()))?;

    Ok(path)
}

/// Log to stderr
pub fn init_stderr() -> Result<(), LoggingError> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .try_init()
        .map_err(|e| LoggingError::Install(e.to_string()))
}
