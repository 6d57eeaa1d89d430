use chrono::{DateTime, Local, TimeZone};
use colored::Colorize;
use std::fmt;

/// Kind of change detected for a file between two scans
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    /// File appeared since the previous scan
    Added,
    /// File fingerprint differs from the previous scan
    Changed,
    /// File from the previous scan is gone
    Deleted,
}

impl FileStatus {
    /// Returns the status character used in short format
    #[must_use]
    pub const fn short_char(&self) -> char {
        match self {
            Self::Added => 'A',
            Self::Changed => 'M',
            Self::Deleted => 'D',
        }
    }

    /// Returns the colored status character
    #[must_use]
    pub fn colored_char(&self) -> String {
        match self {
            Self::Added => "A".green().to_string(),
            Self::Changed => "M".yellow().to_string(),
            Self::Deleted => "D".red().to_string(),
        }
    }

    /// Returns the full status name
    #[must_use]
    pub const fn name(&self) -> &str {
        match self {
            Self::Added => "added",
            Self::Changed => "changed",
            Self::Deleted => "deleted",
        }
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Formats a file path with its status
#[must_use]
pub fn format_file_status(status: FileStatus, path: &str) -> String {
    format!("{} {path}", status.colored_char())
}

/// Formats bytes into a human-readable size using decimal (10^3) steps.
///
/// A unit is chosen only when the value is strictly greater than its base,
/// so exactly 1000 bytes stays `1000 B`.
#[must_use]
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[(u64, &str)] = &[
        (1_000_000_000, "GB"),
        (1_000_000, "MB"),
        (1_000, "KB"),
    ];

    for &(base, unit) in UNITS {
        if bytes > base {
            #[allow(clippy::cast_precision_loss)]
            let scaled = bytes as f64 / base as f64;
            return format!("{} {unit}", trim_decimals(scaled));
        }
    }

    format!("{bytes} B")
}

/// Renders with at most two decimals, dropping trailing zeros.
fn trim_decimals(value: f64) -> String {
    let rendered = format!("{value:.2}");
    rendered
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Formats a unix timestamp in local time
#[must_use]
pub fn format_timestamp(timestamp: i64) -> String {
    let datetime = Local.timestamp_opt(timestamp, 0).single();
    datetime.map_or_else(
        || format!("Invalid timestamp: {timestamp}"),
        |dt| format_datetime(&dt),
    )
}

/// Formats a point in time the way reports print it
#[must_use]
pub fn format_datetime<Tz: TimeZone>(datetime: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    datetime.format("%Y-%m-%d %H:%M:%S").to_string()
}
