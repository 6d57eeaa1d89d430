//! File fingerprints.
//!
//! A [`FileRecord`] is the observed state of one file at scan time. Records
//! are never patched: every scan builds a fresh generation by re-reading the
//! filesystem, and two records are the same file state iff their checksums
//! are equal.

use crate::error::RecordError;
use crate::utils::format_size;
use crate::utils::hash::{hash_attributes, hash_file, path_key};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

/// Field separator of the snapshot line format.
pub const SEPARATOR: char = ';';

/// Minimum number of fields a snapshot line must split into.
const MIN_FIELDS: usize = 4;

/// How a file's checksum is derived.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    /// Hash of size and modification time; stat only.
    #[default]
    Attribute,
    /// Hash of the full file content.
    Content,
}

impl fmt::Display for ScanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attribute => write!(f, "attribute"),
            Self::Content => write!(f, "content"),
        }
    }
}

/// Fingerprint of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    path: String,
    path_key: String,
    size: u64,
    modified_at: i64,
    checksum: String,
    extension: String,
}

impl FileRecord {
    /// Builds a record from already known fields, deriving the key and extension.
    #[must_use]
    pub fn new(
        path: impl Into<String>,
        size: u64,
        modified_at: i64,
        checksum: impl Into<String>,
    ) -> Self {
        let path = path.into();
        Self {
            path_key: path_key(&path),
            extension: extension_of(&path),
            path,
            size,
            modified_at,
            checksum: checksum.into(),
        }
    }

    /// Stats `path` and computes its checksum according to `mode`.
    ///
    /// # Errors
    ///
    /// - [`RecordError::UnsupportedPath`] if the path is not UTF-8 or contains a line break
    /// - [`RecordError::NotAFile`] if the path is missing or not a regular file
    /// - [`RecordError::Io`] / [`RecordError::Checksum`] if stat or reading fails
    pub fn fingerprint(path: &Path, mode: ScanMode) -> Result<Self, RecordError> {
        let path_str = path
            .to_str()
            .filter(|p| !p.contains(['\n', '\r']))
            .ok_or_else(|| RecordError::UnsupportedPath(path.to_path_buf()))?;

        let metadata = match std::fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(RecordError::NotAFile(path.to_path_buf()));
            }
            Err(source) => {
                return Err(RecordError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        if !metadata.is_file() {
            return Err(RecordError::NotAFile(path.to_path_buf()));
        }

        let size = metadata.len();
        let modified_at = metadata
            .modified()
            .map(unix_seconds)
            .map_err(|source| RecordError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let checksum = match mode {
            ScanMode::Attribute => hash_attributes(size, modified_at),
            ScanMode::Content => hash_file(path).map_err(|source| RecordError::Checksum {
                path: path.to_path_buf(),
                source,
            })?,
        };

        debug!(path = path_str, size, modified_at, %mode, "fingerprinted");

        Ok(Self::new(path_str, size, modified_at, checksum))
    }

    /// Decodes one snapshot line.
    ///
    /// The last three fields before the terminating separator are size,
    /// mtime and checksum; everything in front of them is the path, so paths
    /// containing the separator survive. Non-numeric size or mtime become 0.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::MalformedRecord`] if fewer than four fields are present.
    pub fn parse(line: &str, separator: char) -> Result<Self, RecordError> {
        let line = line.trim_end_matches(['\n', '\r']);
        let parts: Vec<&str> = line.split(separator).collect();

        if parts.len() < MIN_FIELDS {
            return Err(RecordError::MalformedRecord {
                expected: MIN_FIELDS,
                found: parts.len(),
            });
        }

        // Drop the empty field after the terminating separator.
        let fields = match parts.split_last() {
            Some((last, rest)) if last.is_empty() && rest.len() >= MIN_FIELDS => rest,
            _ => parts.as_slice(),
        };

        let n = fields.len();
        let path = fields[..n - 3].join(separator.to_string().as_str());
        let size = fields[n - 3].trim().parse().unwrap_or(0);
        let modified_at = fields[n - 2].trim().parse().unwrap_or(0);

        Ok(Self::new(path, size, modified_at, fields[n - 1]))
    }

    /// Encodes the record as `path;size;modifiedAt;checksum;` (no line break).
    #[must_use]
    pub fn serialize(&self, separator: char) -> String {
        format!(
            "{path}{s}{size}{s}{mtime}{s}{checksum}{s}",
            path = self.path,
            size = self.size,
            mtime = self.modified_at,
            checksum = self.checksum,
            s = separator,
        )
    }

    /// Compares this (older) record with a newer observation of the same path.
    ///
    /// Returns `None` when the checksums match, otherwise a human-readable reason.
    #[must_use]
    pub fn compare(&self, newer: &Self) -> Option<String> {
        if self.checksum == newer.checksum {
            return None;
        }

        if self.size == newer.size {
            Some("size unchanged, content or attributes differ".to_string())
        } else {
            Some(format!(
                "size changed from {} to {}",
                format_size(self.size),
                format_size(newer.size)
            ))
        }
    }

    /// File path as scanned
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Fixed-width hash of the path, used as a map key
    #[must_use]
    pub fn path_key(&self) -> &str {
        &self.path_key
    }

    /// Size in bytes
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Modification time in unix seconds
    #[must_use]
    pub const fn modified_at(&self) -> i64 {
        self.modified_at
    }

    /// Mode dependent checksum
    #[must_use]
    pub fn checksum(&self) -> &str {
        &self.checksum
    }

    /// Lower-cased extension, empty when the file name has none
    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }
}

/// Lower-cased text after the last `.` of the file name.
///
/// Dot-files such as `.htaccess` yield `htaccess`.
#[must_use]
pub fn extension_of(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default()
}

fn unix_seconds(time: SystemTime) -> i64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(d) => i64::try_from(d.as_secs()).unwrap_or(i64::MAX),
        Err(e) => i64::try_from(e.duration().as_secs()).map_or(i64::MIN, |s| -s),
    }
}
