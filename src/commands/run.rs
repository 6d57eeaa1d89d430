use crate::SficContext;
use crate::events::TracingLogger;
use crate::lock::RunLock;
use crate::monitor::{Monitor, SystemClock};
use crate::notify::{LogNotifier, Notifier, SendmailNotifier};
use crate::output;
use anyhow::{Context, Result};
use std::path::Path;

/// Scans every configured directory, prints the run report and sends it.
///
/// # Errors
///
/// Returns an error if:
/// - Another run holds the lock
/// - No scan targets are configured
pub fn execute(ctx: &SficContext, lock_file: Option<&Path>, no_notify: bool) -> Result<()> {
    let lock_path = lock_file.map_or_else(|| ctx.lock_path(), Path::to_path_buf);
    let _lock = RunLock::acquire(&lock_path)?;

    let logger = TracingLogger;
    let clock = SystemClock;
    let monitor = Monitor::new(&logger, &clock);

    let report = monitor
        .run_all(&ctx.config.scan)
        .with_context(|| format!("Nothing to scan in {}", ctx.config_path.display()))?;

    output::report(&report.to_string());

    if no_notify {
        return Ok(());
    }

    let notifier: Box<dyn Notifier + '_> = match SendmailNotifier::from_path() {
        Ok(sendmail) => Box::new(sendmail),
        Err(e) => {
            output::warning(&format!("{e:#}; writing the report to the log instead"));
            Box::new(LogNotifier::new(&logger))
        }
    };
    monitor.notify(&report, &ctx.config.notify, notifier.as_ref());

    Ok(())
}
