use crate::diff::report::format_report;
use crate::events::TracingLogger;
use crate::output;
use crate::record::ScanMode;
use crate::scanner::{DirectoryScanner, ExtensionFilter};
use anyhow::{Context, Result};
use chrono::Local;
use std::path::Path;

/// Scans a single directory outside the configuration and prints its report.
///
/// The directory's snapshot is updated exactly as in a configured run.
///
/// # Errors
///
/// Returns an error if the directory does not exist or its snapshot cannot
/// be written.
pub fn execute(dir: &Path, mode: ScanMode, extensions: &str, short: bool) -> Result<()> {
    let filter = ExtensionFilter::parse_list(extensions);
    if filter.is_empty() {
        output::warning("No extensions given, nothing will be scanned (use \"*\" for all)");
    }

    let scanner = DirectoryScanner::new(dir, mode, filter);
    let result = scanner
        .scan(&TracingLogger)
        .with_context(|| format!("Failed to scan {}", dir.display()))?;

    if result.is_empty() {
        super::print_info(&format!(
            "No changes detected ({} files examined)",
            result.examined
        ));
        return Ok(());
    }

    if short {
        for (status, path) in result.entries() {
            output::file_status(status, path);
        }
    } else {
        output::report(&format_report(&result, scanner.dir(), &Local::now()));
    }

    if result.failed > 0 {
        output::warning(&format!(
            "{} files could not be fingerprinted, see the log",
            result.failed
        ));
    }

    Ok(())
}
