use super::DiffResult;
use crate::utils::format_datetime;
use chrono::{DateTime, TimeZone};
use std::fmt::{Display, Write};
use std::path::Path;

/// Renders the change report for one directory.
///
/// The header (directory, time, counts) is always present; the `Changed`,
/// `Added` and `Deleted` blocks follow in that order and are left out when
/// empty. Every line ends with a line break.
#[must_use]
pub fn format_report<Tz: TimeZone>(
    result: &DiffResult,
    dir: &Path,
    at: &DateTime<Tz>,
) -> String
where
    Tz::Offset: Display,
{
    let mut report = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(
        report,
        "Scan results for {} ({}):",
        dir.display(),
        format_datetime(at)
    );
    let _ = writeln!(
        report,
        "Examined {} files, added: {}, changed: {}, deleted: {}",
        result.examined,
        result.added.len(),
        result.changed.len(),
        result.deleted.len()
    );

    if !result.changed.is_empty() {
        report.push_str("Changed:\n");
        for changed in &result.changed {
            let _ = writeln!(report, "{}: {}", changed.path, changed.reason);
        }
    }

    push_block(&mut report, "Added:", &result.added);
    push_block(&mut report, "Deleted:", &result.deleted);

    report
}

fn push_block(report: &mut String, title: &str, paths: &[String]) {
    if paths.is_empty() {
        return;
    }
    report.push_str(title);
    report.push('\n');
    for path in paths {
        report.push_str(path);
        report.push('\n');
    }
}
