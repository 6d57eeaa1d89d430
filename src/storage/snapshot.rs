//! Snapshot codec: the per-directory record file.
//!
//! A snapshot holds one [`FileRecord`] per line (`path;size;modifiedAt;checksum;`).
//! It is read once at the start of a scan and then rewritten from scratch,
//! record by record, while the scan walks the tree.

use crate::SNAPSHOT_FILE;
use crate::error::{ScanError, ScanResult};
use crate::events::ScanLogger;
use crate::record::{FileRecord, SEPARATOR};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind, LineWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{Level, debug, span};

/// Location of the snapshot file for a scanned directory
#[must_use]
pub fn snapshot_path(dir: &Path) -> PathBuf {
    dir.join(SNAPSHOT_FILE)
}

/// Records of a previous scan keyed by path key, in file order.
///
/// Entries are taken out as the new scan matches them, so whatever is left
/// at the end are the files that were not seen again.
#[derive(Debug, Default, Clone)]
pub struct SnapshotIndex {
    /// Records in load order; `None` once taken
    slots: Vec<Option<FileRecord>>,
    /// Path key -> slot
    positions: HashMap<String, usize>,
}

impl SnapshotIndex {
    /// Creates an empty index
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record. A repeated key replaces the earlier record in place.
    pub fn insert(&mut self, record: FileRecord) {
        if let Some(&slot) = self.positions.get(record.path_key()) {
            self.slots[slot] = Some(record);
            return;
        }
        self.positions
            .insert(record.path_key().to_string(), self.slots.len());
        self.slots.push(Some(record));
    }

    /// Removes and returns the record for `path_key`
    pub fn take(&mut self, path_key: &str) -> Option<FileRecord> {
        let slot = self.positions.remove(path_key)?;
        self.slots[slot].take()
    }

    /// Number of records not yet taken
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether every record has been taken
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Records not yet taken, in load order
    pub fn remaining(&self) -> impl Iterator<Item = &FileRecord> {
        self.slots.iter().flatten()
    }

    /// Consumes the index, yielding records not yet taken in load order
    pub fn into_remaining(self) -> impl Iterator<Item = FileRecord> {
        self.slots.into_iter().flatten()
    }
}

impl FromIterator<FileRecord> for SnapshotIndex {
    fn from_iter<I: IntoIterator<Item = FileRecord>>(iter: I) -> Self {
        let mut index = Self::new();
        for record in iter {
            index.insert(record);
        }
        index
    }
}

/// Reads the snapshot at `path`.
///
/// A missing file is an empty snapshot. Malformed lines are skipped with a
/// warning; a read failure part way keeps what was read so far.
pub fn load(path: &Path, logger: &dyn ScanLogger) -> SnapshotIndex {
    let span = span!(Level::DEBUG, "snapshot_load", path = %path.display());
    let _guard = span.enter();

    let mut index = SnapshotIndex::new();

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No previous snapshot");
            return index;
        }
        Err(e) => {
            logger.error(&format!(
                "Cannot read previous snapshot {}: {e}",
                path.display()
            ));
            return index;
        }
    };

    let mut reader = BufReader::new(file);
    let mut buffer = Vec::new();
    let mut line_number = 0usize;
    let mut skipped = 0usize;

    loop {
        buffer.clear();
        match reader.read_until(b'\n', &mut buffer) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                logger.error(&format!(
                    "Reading snapshot {} stopped after line {line_number}: {e}",
                    path.display()
                ));
                break;
            }
        }
        line_number += 1;

        let parsed = simdutf8::basic::from_utf8(&buffer)
            .map_err(|_| "invalid UTF-8".to_string())
            .and_then(|line| FileRecord::parse(line, SEPARATOR).map_err(|e| e.to_string()));

        match parsed {
            Ok(record) => index.insert(record),
            Err(reason) => {
                skipped += 1;
                logger.warning(&format!(
                    "Skipping corrupt snapshot line {}:{line_number}: {reason}",
                    path.display()
                ));
            }
        }
    }

    debug!(records = index.len(), skipped, "Snapshot loaded");
    index
}

/// Streaming writer for a new snapshot.
///
/// Each appended record reaches the file at its line break, so progress
/// survives an interrupted scan. The file handle is released when the
/// writer is finished or dropped.
#[derive(Debug)]
pub struct SnapshotWriter {
    writer: LineWriter<File>,
    path: PathBuf,
    written: usize,
}

impl SnapshotWriter {
    /// Creates or truncates the snapshot file.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::CannotPersist`] if the file cannot be created.
    pub fn begin(path: &Path) -> ScanResult<Self> {
        let file = File::create(path).map_err(|source| ScanError::CannotPersist {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            writer: LineWriter::new(file),
            path: path.to_path_buf(),
            written: 0,
        })
    }

    /// Writes one record line.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::CannotPersist`] if the write fails.
    pub fn append(&mut self, record: &FileRecord) -> ScanResult<()> {
        writeln!(self.writer, "{}", record.serialize(SEPARATOR)).map_err(|source| {
            ScanError::CannotPersist {
                path: self.path.clone(),
                source,
            }
        })?;
        self.written += 1;
        Ok(())
    }

    /// Number of records written so far
    #[must_use]
    pub const fn written(&self) -> usize {
        self.written
    }

    /// Flushes and closes the file.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::CannotPersist`] if flushing or syncing fails.
    pub fn finish(mut self) -> ScanResult<()> {
        let path = self.path.clone();
        let to_error = |source| ScanError::CannotPersist {
            path: path.clone(),
            source,
        };
        self.writer.flush().map_err(to_error)?;
        self.writer.get_ref().sync_all().map_err(to_error)?;
        Ok(())
    }
}
