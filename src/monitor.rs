//! Run orchestration: scans every configured directory in order, isolates
//! per-directory failures and assembles the run-level report.

use crate::config::{NotifyConfig, ScanTarget};
use crate::diff::report::format_report;
use crate::error::{ScanError, ScanResult};
use crate::events::ScanLogger;
use crate::notify::Notifier;
use chrono::{DateTime, Local};
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// Source of wall-clock time for report headers and elapsed time
pub trait Clock {
    /// Current local time
    fn now(&self) -> DateTime<Local>;
}

/// The system clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock stuck at one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Local>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

/// What one configured directory contributed to a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryOutcome {
    /// Changes were found; the formatted directory report
    Report(String),
    /// Scanned successfully, nothing changed
    Unchanged,
    /// Directory-level failure of the target at this index
    Failed(usize),
}

/// Aggregate of one run over all targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Wall-clock time spent scanning
    elapsed: Duration,
    /// One entry per target, in configuration order
    outcomes: Vec<DirectoryOutcome>,
}

impl RunReport {
    /// Wall-clock time of the run, truncated to milliseconds
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Per-target outcomes in configuration order
    #[must_use]
    pub fn outcomes(&self) -> &[DirectoryOutcome] {
        &self.outcomes
    }

    /// Whether any directory changed or failed
    #[must_use]
    pub fn has_content(&self) -> bool {
        self.outcomes
            .iter()
            .any(|o| !matches!(o, DirectoryOutcome::Unchanged))
    }

    /// Number of targets that could not be scanned
    #[must_use]
    pub fn failures(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, DirectoryOutcome::Failed(_)))
            .count()
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Scan completed in {}",
            humantime::format_duration(self.elapsed)
        )?;
        for outcome in &self.outcomes {
            match outcome {
                DirectoryOutcome::Report(report) => writeln!(f, "{report}")?,
                DirectoryOutcome::Failed(index) => writeln!(
                    f,
                    "Could not scan configuration #{index}, see the log for details"
                )?,
                DirectoryOutcome::Unchanged => {}
            }
        }
        Ok(())
    }
}

/// Runs scans with an injected logger and clock
pub struct Monitor<'a> {
    /// Receives every engine message
    logger: &'a dyn ScanLogger,
    /// Report timestamps and elapsed time
    clock: &'a dyn Clock,
}

impl<'a> Monitor<'a> {
    /// Create a monitor reporting through `logger`
    #[must_use]
    pub fn new(logger: &'a dyn ScanLogger, clock: &'a dyn Clock) -> Self {
        Self { logger, clock }
    }

    /// Scans every target in order and returns the aggregate report.
    ///
    /// A failing directory only contributes a failure notice; the rest of the
    /// batch still runs.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::ConfigMissing`] if `targets` is empty.
    pub fn run_all(&self, targets: &[ScanTarget]) -> ScanResult<RunReport> {
        if targets.is_empty() {
            self.logger
                .critical("No scan targets configured; add at least one [[scan]] entry");
            return Err(ScanError::ConfigMissing);
        }

        let started = self.clock.now();
        let outcomes = targets
            .iter()
            .enumerate()
            .map(|(index, target)| self.scan_target(index, target))
            .collect();

        let elapsed = (self.clock.now() - started).to_std().unwrap_or_default();
        #[allow(clippy::cast_possible_truncation)]
        let elapsed = Duration::from_millis(elapsed.as_millis() as u64);

        let report = RunReport { elapsed, outcomes };
        self.logger.info(&report.to_string());
        Ok(report)
    }

    /// Scans one target, turning directory-level errors into a failure outcome
    pub fn scan_target(&self, index: usize, target: &ScanTarget) -> DirectoryOutcome {
        let Some(scanner) = target.scanner() else {
            self.logger.warning(&ScanError::MissingDir(index).to_string());
            return DirectoryOutcome::Failed(index);
        };

        match scanner.scan(self.logger) {
            Ok(result) if result.is_empty() => {
                debug!(index, examined = result.examined, "No changes");
                DirectoryOutcome::Unchanged
            }
            Ok(result) => DirectoryOutcome::Report(format_report(
                &result,
                scanner.dir(),
                &self.clock.now(),
            )),
            Err(e) => {
                self.logger.error(&format!("Could not scan configuration #{index}: {e}"));
                DirectoryOutcome::Failed(index)
            }
        }
    }

    /// Hands the report to `notifier` when there is something to say.
    ///
    /// Returns whether a message was sent. Missing addresses and delivery
    /// failures are logged as errors.
    pub fn notify(&self, report: &RunReport, config: &NotifyConfig, notifier: &dyn Notifier) -> bool {
        if !report.has_content() && !config.always {
            debug!("Nothing to report");
            return false;
        }

        let Some((to, from)) = config.addresses() else {
            self.logger.error("Report was not sent: notify.to or notify.from is not set");
            return false;
        };

        match notifier.send(to, from, &config.subject, &report.to_string()) {
            Ok(()) => {
                self.logger.info(&format!("Report sent to {to}"));
                true
            }
            Err(e) => {
                self.logger.error(&format!("Failed to send report to {to}: {e:#}"));
                false
            }
        }
    }
}
