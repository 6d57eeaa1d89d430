#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
// Allow pedantic strict lints that create false positives in this codebase
#![allow(clippy::arithmetic_side_effects)] // Simple counters and size calculations cannot overflow
#![allow(clippy::float_arithmetic)] // Required for file size formatting
#![allow(clippy::indexing_slicing)] // Bounds checked by logic

//! # sfic - Simple File Integrity Checker
//!
//! sfic scans configured directory trees, fingerprints every file with a
//! selected extension, compares the fingerprints against the snapshot left
//! by the previous scan and reports files that were added, changed or
//! deleted in between. It is meant to be run periodically (cron, systemd
//! timers) against web roots and similar trees that should not change
//! behind an operator's back.
//!
//! ## Features
//!
//! - **Two fingerprint modes**: cheap `attribute` mode (size + mtime) or
//!   `content` mode (xxHash3-128 of the full bytes, memory-mapped for large files)
//! - **Streaming snapshots**: one `data.sfic` text file per scanned directory,
//!   written record by record
//! - **Failure isolation**: one broken directory never stops the others
//! - **Injected collaborators**: logging, clock and report delivery are passed
//!   in, never global
//!
//! ## Architecture
//!
//! - [`record`]: [`FileRecord`] fingerprints and their line codec
//! - [`storage`]: snapshot loading and streaming snapshot writes
//! - [`scanner`]: the per-directory scan and extension filtering
//! - [`diff`]: added/changed/deleted classification and report rendering
//! - [`monitor`]: the run over all configured directories
//! - [`config`], [`logging`], [`notify`], [`lock`]: the surrounding glue
//!
//! ## Example Usage
//!
//! ```no_run
//! use sfic::events::TracingLogger;
//! use sfic::monitor::{Monitor, SystemClock};
//! use sfic::config::ScanTarget;
//! use sfic::record::ScanMode;
//!
//! # fn main() -> anyhow::Result<()> {
//! let targets = [ScanTarget::new("/var/www/site", ScanMode::Content, &["php", "js"])];
//!
//! let logger = TracingLogger;
//! let clock = SystemClock;
//! let report = Monitor::new(&logger, &clock).run_all(&targets)?;
//! print!("{report}");
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions (argument parsing structures).
pub mod cli;

/// Command implementations behind the CLI.
pub mod commands;

/// Configuration parsing, validation, and management.
pub mod config;

/// Change classification and per-directory reports.
pub mod diff;

/// Error types of the scan engine.
pub mod error;

/// Leveled logging collaborator used by the engine.
pub mod events;

/// Single-instance run lock.
pub mod lock;

/// Global tracing subscriber and log file rotation.
pub mod logging;

/// Run orchestration over all configured directories.
pub mod monitor;

/// Report delivery.
pub mod notify;

/// Terminal output helpers.
pub mod output;

/// File fingerprints.
pub mod record;

/// Recursive directory scanning.
pub mod scanner;

/// Snapshot persistence.
pub mod storage;

/// Utility functions and helpers.
pub mod utils;

pub use config::Config;
pub use diff::DiffResult;
pub use error::{RecordError, ScanError};
pub use record::{FileRecord, ScanMode};

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Current version of the sfic binary.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the snapshot file kept inside every scanned directory.
pub const SNAPSHOT_FILE: &str = "data.sfic";

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "SFIC_CONFIG";

/// Loaded configuration plus where it came from.
#[derive(Debug, Clone)]
pub struct SficContext {
    /// Path the configuration was loaded from.
    pub config_path: PathBuf,
    /// Loaded configuration settings.
    pub config: Config,
}

impl SficContext {
    /// Loads the configuration from `config_path`, or from the default
    /// location when `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No path is given and the platform config directory is unknown
    /// - The configuration file is missing or invalid
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_path {
            Some(path) => path,
            None => Config::default_path()?,
        };

        let config = Config::load(&config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

        Ok(Self {
            config_path,
            config,
        })
    }

    /// Lock file for runs using this configuration
    #[must_use]
    pub fn lock_path(&self) -> PathBuf {
        self.config.lock_path(&self.config_path)
    }
}
