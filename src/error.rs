//! Error taxonomy of the scan engine.
//!
//! File-level ([`RecordError`]) failures are recovered where they happen;
//! directory-level ([`ScanError`]) failures abort one directory only; only
//! [`ScanError::ConfigMissing`] stops a whole run.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to build or decode a single [`FileRecord`](crate::record::FileRecord).
#[derive(Debug, Error)]
pub enum RecordError {
    /// The path does not name a regular file (directory, vanished, dangling link).
    #[error("not a regular file: {}", .0.display())]
    NotAFile(PathBuf),

    /// The path cannot be stored in a line-oriented snapshot.
    #[error("path cannot be stored in a snapshot (non UTF-8 or contains a line break): {}", .0.display())]
    UnsupportedPath(PathBuf),

    /// Stat or read failed.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying cause
        #[source]
        source: std::io::Error,
    },

    /// Checksum computation failed.
    #[error("cannot checksum {}: {source}", path.display())]
    Checksum {
        /// File that failed
        path: PathBuf,
        /// Underlying cause
        #[source]
        source: anyhow::Error,
    },

    /// A snapshot line with too few fields or invalid encoding.
    #[error("malformed snapshot record: expected {expected} fields, found {found}")]
    MalformedRecord {
        /// Minimum number of fields
        expected: usize,
        /// Fields actually present
        found: usize,
    },
}

/// Directory-level scan failure.
#[derive(Debug, Error)]
pub enum ScanError {
    /// No scan targets are configured at all.
    #[error("no scan targets configured")]
    ConfigMissing,

    /// A scan target has no directory set.
    #[error("scan target #{0} has no directory set")]
    MissingDir(usize),

    /// The directory to scan does not exist.
    #[error("directory not found: {}", .0.display())]
    DirNotFound(PathBuf),

    /// The snapshot file cannot be created or written.
    #[error("cannot persist snapshot {}: {source}", path.display())]
    CannotPersist {
        /// Snapshot file path
        path: PathBuf,
        /// Underlying cause
        #[source]
        source: std::io::Error,
    },
}

/// Result alias for directory scans.
pub type ScanResult<T> = std::result::Result<T, ScanError>;
