//! Directory scanner: walks one tree, fingerprints matching files, streams
//! the new snapshot and classifies every record against the previous one.

/// Extension based file selection.
pub mod filter;

pub use filter::ExtensionFilter;

use crate::diff::{ChangeTracker, DiffResult};
use crate::error::{ScanError, ScanResult};
use crate::events::ScanLogger;
use crate::record::{FileRecord, ScanMode, extension_of};
use crate::storage::{SnapshotWriter, load, snapshot_path};
use std::path::{Path, PathBuf};
use tracing::{Level, debug, span};
use walkdir::WalkDir;

/// Scanner for one configured directory
#[derive(Debug, Clone)]
pub struct DirectoryScanner {
    /// Root of the tree; also holds the snapshot file
    dir: PathBuf,
    /// Checksum derivation
    mode: ScanMode,
    /// Extensions owned by this scan
    filter: ExtensionFilter,
}

impl DirectoryScanner {
    /// Create a new directory scanner
    ///
    /// # Arguments
    ///
    /// * `dir` - Directory to scan recursively
    /// * `mode` - How checksums are computed
    /// * `filter` - Extensions to fingerprint; everything else is ignored
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, mode: ScanMode, filter: ExtensionFilter) -> Self {
        Self {
            dir: dir.into(),
            mode,
            filter,
        }
    }

    /// Scans the directory, rewrites its snapshot and returns the changes.
    ///
    /// Files that cannot be fingerprinted are logged and skipped; they show
    /// up in none of the result lists. A skipped file keeps its previous
    /// record in the new snapshot, if it had one.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The directory does not exist ([`ScanError::DirNotFound`])
    /// - The snapshot cannot be created or written ([`ScanError::CannotPersist`])
    pub fn scan(&self, logger: &dyn ScanLogger) -> ScanResult<DiffResult> {
        let span = span!(Level::DEBUG, "scan_directory", dir = %self.dir.display());
        let _guard = span.enter();

        if !self.dir.is_dir() {
            return Err(ScanError::DirNotFound(self.dir.clone()));
        }

        logger.info(&format!(
            "Scanning {} ({} mode, extensions: {})",
            self.dir.display(),
            self.mode,
            self.filter
        ));

        let snapshot = snapshot_path(&self.dir);
        let previous = load(&snapshot, logger);
        debug!(previous = previous.len(), "Previous snapshot loaded");

        let mut writer = SnapshotWriter::begin(&snapshot)?;
        let mut tracker = ChangeTracker::new(previous, self.filter.clone());

        for entry in WalkDir::new(&self.dir).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let at = e.path().unwrap_or(self.dir.as_path()).display().to_string();
                    logger.error(&format!("Cannot read {at}: {e}"));
                    continue;
                }
            };

            if entry.file_type().is_dir() || entry.path() == snapshot {
                continue;
            }

            if !self.wants(entry.path()) {
                continue;
            }

            match FileRecord::fingerprint(entry.path(), self.mode) {
                Ok(record) => {
                    writer.append(&record)?;
                    tracker.observe(&record);
                }
                Err(e) => {
                    logger.error(&format!("Could not fingerprint file: {e}"));
                    if let Some(previous) = tracker.skip(entry.path()) {
                        writer.append(&previous)?;
                    }
                }
            }
        }

        writer.finish()?;
        let result = tracker.finish();

        logger.info(&format!(
            "Finished {}: examined {}, failed {}, added {}, changed {}, deleted {}",
            self.dir.display(),
            result.examined,
            result.failed,
            result.added.len(),
            result.changed.len(),
            result.deleted.len()
        ));

        Ok(result)
    }

    /// Whether the file name's extension is in the filter
    fn wants(&self, path: &Path) -> bool {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        self.filter.matches(&extension_of(&name))
    }

    /// Directory being scanned
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Checksum mode
    #[must_use]
    pub const fn mode(&self) -> ScanMode {
        self.mode
    }

    /// Extension filter
    #[must_use]
    pub const fn filter(&self) -> &ExtensionFilter {
        &self.filter
    }
}
