//! Three-way classification of a scan against the previous snapshot.
//!
//! [`ChangeTracker`] consumes the previous [`SnapshotIndex`] as new records
//! arrive: a matched entry is removed, so once the walk is over the index
//! holds exactly the files that disappeared.

/// Per-directory report rendering
pub mod report;

use crate::record::FileRecord;
use crate::scanner::ExtensionFilter;
use crate::storage::SnapshotIndex;
use crate::utils::formatters::FileStatus;
use crate::utils::hash::path_key;
use std::path::Path;

/// A file whose checksum differs from the previous scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedFile {
    /// File path
    pub path: String,
    /// Human-readable description of the difference
    pub reason: String,
}

/// Outcome of one directory scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffResult {
    /// New paths, in discovery order
    pub added: Vec<String>,
    /// Changed paths with reasons, in discovery order
    pub changed: Vec<ChangedFile>,
    /// Vanished paths, in previous snapshot order
    pub deleted: Vec<String>,
    /// Files fingerprinted and written to the new snapshot
    pub examined: usize,
    /// Files that matched the filter but could not be fingerprinted
    pub failed: usize,
}

impl DiffResult {
    /// True when nothing was added, changed or deleted
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.changed.is_empty() && self.deleted.is_empty()
    }

    /// Total number of reported files
    #[must_use]
    pub fn total_changes(&self) -> usize {
        self.added.len() + self.changed.len() + self.deleted.len()
    }

    /// Every reported path with its status: changed, then added, then deleted
    pub fn entries(&self) -> impl Iterator<Item = (FileStatus, &str)> {
        self.changed
            .iter()
            .map(|c| (FileStatus::Changed, c.path.as_str()))
            .chain(self.added.iter().map(|p| (FileStatus::Added, p.as_str())))
            .chain(self.deleted.iter().map(|p| (FileStatus::Deleted, p.as_str())))
    }
}

/// Incremental classifier fed by the directory walk
#[derive(Debug)]
pub struct ChangeTracker {
    previous: SnapshotIndex,
    filter: ExtensionFilter,
    result: DiffResult,
}

impl ChangeTracker {
    /// Starts classification against the previous scan's records
    #[must_use]
    pub fn new(previous: SnapshotIndex, filter: ExtensionFilter) -> Self {
        Self {
            previous,
            filter,
            result: DiffResult::default(),
        }
    }

    /// Classifies a freshly fingerprinted record
    pub fn observe(&mut self, record: &FileRecord) {
        self.result.examined += 1;

        match self.previous.take(record.path_key()) {
            Some(old) => {
                if let Some(reason) = old.compare(record) {
                    self.result.changed.push(ChangedFile {
                        path: record.path().to_string(),
                        reason,
                    });
                }
            }
            None => self.result.added.push(record.path().to_string()),
        }
    }

    /// Counts a file that could not be fingerprinted.
    ///
    /// Its previous record, if any, is taken out unclassified and returned so
    /// the caller can carry it into the new snapshot. A file that exists but
    /// cannot be read is neither deleted now nor added on the next scan.
    pub fn skip(&mut self, path: &Path) -> Option<FileRecord> {
        self.result.failed += 1;
        let path = path.to_str()?;
        self.previous.take(&path_key(path))
    }

    /// Ends the walk; unmatched previous records within the filter are deleted
    #[must_use]
    pub fn finish(self) -> DiffResult {
        let Self {
            previous,
            filter,
            mut result,
        } = self;

        result.deleted = previous
            .into_remaining()
            .filter(|old| filter.matches(old.extension()))
            .map(|old| old.path().to_string())
            .collect();

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn php() -> ExtensionFilter {
        ExtensionFilter::parse_list("php")
    }

    #[test]
    fn test_classifies_added_changed_deleted() {
        let previous: SnapshotIndex = vec![
            FileRecord::new("/w/a.php", 100, 1000, "H1"),
            FileRecord::new("/w/same.php", 5, 5, "S"),
            FileRecord::new("/w/gone.php", 1, 1, "G"),
        ]
        .into_iter()
        .collect();

        let mut tracker = ChangeTracker::new(previous, php());
        tracker.observe(&FileRecord::new("/w/a.php", 200, 1001, "H2"));
        tracker.observe(&FileRecord::new("/w/same.php", 5, 5, "S"));
        tracker.observe(&FileRecord::new("/w/new.php", 1, 1, "N"));
        let result = tracker.finish();

        assert_eq!(result.added, vec!["/w/new.php"]);
        assert_eq!(
            result.changed,
            vec![ChangedFile {
                path: "/w/a.php".into(),
                reason: "size changed from 100 B to 200 B".into(),
            }]
        );
        assert_eq!(result.deleted, vec!["/w/gone.php"]);
        assert_eq!(result.examined, 3);
        assert_eq!(result.total_changes(), 3);
    }

    #[test]
    fn test_deleted_ignores_records_outside_filter() {
        let previous: SnapshotIndex = vec![
            FileRecord::new("/w/old.js", 1, 1, "J"),
            FileRecord::new("/w/old.php", 1, 1, "P"),
        ]
        .into_iter()
        .collect();

        let result = ChangeTracker::new(previous, php()).finish();
        assert_eq!(result.deleted, vec!["/w/old.php"]);
    }

    #[test]
    fn test_skipped_file_is_not_deleted() {
        let previous: SnapshotIndex = vec![
            FileRecord::new("/w/a.php", 1, 1, "A"),
            FileRecord::new("/w/locked.php", 2, 2, "L"),
        ]
        .into_iter()
        .collect();

        let mut tracker = ChangeTracker::new(previous, php());
        tracker.observe(&FileRecord::new("/w/a.php", 1, 1, "A"));
        let carried = tracker.skip(Path::new("/w/locked.php"));
        let result = tracker.finish();

        assert_eq!(carried, Some(FileRecord::new("/w/locked.php", 2, 2, "L")));
        assert!(result.is_empty(), "{result:?}");
        assert_eq!(result.examined, 1);
        assert_eq!(result.failed, 1);
    }

    #[test]
    fn test_empty_previous_reports_everything_added() {
        let mut tracker = ChangeTracker::new(SnapshotIndex::new(), php());
        tracker.observe(&FileRecord::new("/w/a.php", 1, 1, "A"));
        tracker.observe(&FileRecord::new("/w/b.php", 1, 1, "B"));
        assert_eq!(tracker.skip(Path::new("/w/c.php")), None);
        let result = tracker.finish();

        assert_eq!(result.added, vec!["/w/a.php", "/w/b.php"]);
        assert!(result.deleted.is_empty());
        assert_eq!(result.failed, 1);
    }

    #[test]
    fn test_entries_order() {
        let result = DiffResult {
            added: vec!["a".into()],
            changed: vec![ChangedFile {
                path: "c".into(),
                reason: "r".into(),
            }],
            deleted: vec!["d".into()],
            ..DiffResult::default()
        };
        let entries: Vec<_> = result.entries().collect();
        assert_eq!(
            entries,
            vec![
                (FileStatus::Changed, "c"),
                (FileStatus::Added, "a"),
                (FileStatus::Deleted, "d"),
            ]
        );
        assert!(!result.is_empty());
    }
}
