//! Leveled log sink handed to the scan engine.
//!
//! The engine reports through a [`ScanLogger`] it is given instead of a
//! process-wide logger, so concurrent runs (tests in particular) keep their
//! messages apart.

use std::sync::Mutex;

/// Severity of a scan event
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Scan start and finish summaries
    Info,
    /// Corrupt snapshot lines
    Warning,
    /// Per-directory and per-file failures
    Error,
    /// Unrecoverable configuration problems
    Critical,
}

/// Receiver of engine log messages.
pub trait ScanLogger {
    /// Records a message at the given severity
    fn log(&self, severity: Severity, message: &str);

    /// Unrecoverable configuration problem
    fn critical(&self, message: &str) {
        self.log(Severity::Critical, message);
    }

    /// Per-directory or per-file failure
    fn error(&self, message: &str) {
        self.log(Severity::Error, message);
    }

    /// Recoverable data problem
    fn warning(&self, message: &str) {
        self.log(Severity::Warning, message);
    }

    /// Progress summary
    fn info(&self, message: &str) {
        self.log(Severity::Info, message);
    }
}

/// Forwards engine messages to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl ScanLogger for TracingLogger {
    fn log(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Critical => tracing::error!(critical = true, "{message}"),
            Severity::Error => tracing::error!("{message}"),
            Severity::Warning => tracing::warn!("{message}"),
            Severity::Info => tracing::info!("{message}"),
        }
    }
}

/// Keeps every message in memory.
#[derive(Debug, Default)]
pub struct RecordingLogger {
    entries: Mutex<Vec<(Severity, String)>>,
}

impl RecordingLogger {
    /// Creates an empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded messages in arrival order
    #[must_use]
    pub fn entries(&self) -> Vec<(Severity, String)> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    /// Messages recorded at exactly `severity`
    #[must_use]
    pub fn messages(&self, severity: Severity) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|(s, _)| *s == severity)
            .map(|(_, m)| m)
            .collect()
    }
}

impl ScanLogger for RecordingLogger {
    fn log(&self, severity: Severity, message: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push((severity, message.to_string()));
        }
    }
}
