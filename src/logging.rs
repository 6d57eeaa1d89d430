//! Logging setup for the binary.
//!
//! Installs a global tracing subscriber writing to stderr or to the configured
//! log file. The log file is rotated by size before it is opened.

use crate::config::LogConfig;
use crate::output::Verbosity;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*};

/// Errors that may occur while initializing logging.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// Failed to shift old log files.
    #[error("Failed to rotate log file {path}: {source}")]
    Rotate {
        /// File being moved
        path: PathBuf,
        /// Underlying cause
        source: std::io::Error,
    },
    /// Failed to open the log file for appending.
    #[error("Failed to open log file {path}: {source}")]
    Open {
        /// Log file
        path: PathBuf,
        /// Underlying cause
        source: std::io::Error,
    },
    /// Failed to set the global tracing subscriber.
    #[error("Failed to install global tracing subscriber: {0}")]
    SetGlobal(tracing::subscriber::SetGlobalDefaultError),
}

/// Install the global subscriber.
///
/// `RUST_LOG` wins over everything; otherwise `--verbose` selects `debug`,
/// `--quiet` selects `warn` and the configured level applies.
///
/// # Errors
///
/// Returns an error if the log file cannot be rotated or opened, or if a
/// global subscriber is already installed.
pub fn init(verbosity: Verbosity, config: &LogConfig) -> Result<(), LoggingError> {
    let level = match verbosity {
        Verbosity::Verbose => "debug",
        Verbosity::Quiet => "warn",
        Verbosity::Normal => config.level.as_str(),
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (stderr_layer, file_layer) = match &config.file {
        Some(path) => {
            rotate_log(path, config.max_size, config.keep)?;
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| LoggingError::Open {
                    path: path.clone(),
                    source,
                })?;
            let layer = fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(Mutex::new(file));
            (None, Some(layer))
        }
        None => {
            let layer = fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr);
            (Some(layer), None)
        }
    };

    let subscriber = Registry::default()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer);
    tracing::subscriber::set_global_default(subscriber).map_err(LoggingError::SetGlobal)
}

/// Rotate `path` once it has reached `max_size` bytes.
///
/// `path.{n-1}` moves to `path.{n}` for `n = keep..=2`, then `path` becomes
/// `path.1`; whatever was at `path.{keep}` is overwritten. With `keep == 0`
/// the file is simply removed. Returns whether a rotation happened.
///
/// # Errors
///
/// Returns an error if a rename or removal fails.
pub fn rotate_log(path: &Path, max_size: u64, keep: usize) -> Result<bool, LoggingError> {
    let size = match fs::metadata(path) {
        Ok(metadata) => metadata.len(),
        Err(_) => return Ok(false),
    };
    if size < max_size {
        return Ok(false);
    }

    if keep == 0 {
        fs::remove_file(path).map_err(rotate_error(path))?;
        return Ok(true);
    }

    for n in (2..=keep).rev() {
        let from = numbered(path, n - 1);
        if from.exists() {
            fs::rename(&from, numbered(path, n)).map_err(rotate_error(&from))?;
        }
    }
    fs::rename(path, numbered(path, 1)).map_err(rotate_error(path))?;

    Ok(true)
}

fn rotate_error(path: &Path) -> impl FnOnce(std::io::Error) -> LoggingError {
    let path = path.to_path_buf();
    move |source| LoggingError::Rotate { path, source }
}

/// `sfic.log` -> `sfic.log.3`
fn numbered(path: &Path, n: usize) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(format!(".{n}"));
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::TempDir;

    #[test]
    fn test_small_log_is_left_alone() -> Result<()> {
        let temp = TempDir::new()?;
        let log = temp.path().join("sfic.log");
        fs::write(&log, "short")?;

        assert!(!rotate_log(&log, 1000, 2)?);
        assert!(log.exists());
        assert!(!numbered(&log, 1).exists());
        Ok(())
    }

    #[test]
    fn test_missing_log_is_not_rotated() -> Result<()> {
        let temp = TempDir::new()?;
        assert!(!rotate_log(&temp.path().join("absent.log"), 1, 2)?);
        Ok(())
    }

    #[test]
    fn test_rotation_shifts_generations() -> Result<()> {
        let temp = TempDir::new()?;
        let log = temp.path().join("sfic.log");
        fs::write(&log, "current")?;
        fs::write(numbered(&log, 1), "older")?;
        fs::write(numbered(&log, 2), "oldest")?;

        assert!(rotate_log(&log, 5, 2)?);

        assert!(!log.exists());
        assert_eq!(fs::read_to_string(numbered(&log, 1))?, "current");
        assert_eq!(fs::read_to_string(numbered(&log, 2))?, "older");
        assert!(!numbered(&log, 3).exists());
        Ok(())
    }

    #[test]
    fn test_rotation_at_exact_threshold() -> Result<()> {
        let temp = TempDir::new()?;
        let log = temp.path().join("sfic.log");
        fs::write(&log, "12345")?;

        assert!(rotate_log(&log, 5, 1)?);
        assert_eq!(fs::read_to_string(numbered(&log, 1))?, "12345");
        Ok(())
    }

    #[test]
    fn test_keep_zero_discards() -> Result<()> {
        let temp = TempDir::new()?;
        let log = temp.path().join("sfic.log");
        fs::write(&log, "data")?;

        assert!(rotate_log(&log, 1, 0)?);
        assert!(!log.exists());
        assert!(!numbered(&log, 1).exists());
        Ok(())
    }
}
