//! Delivery of run reports.

use crate::events::ScanLogger;
use anyhow::{Context, Result, bail};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Sends a finished run report somewhere
pub trait Notifier {
    /// Delivers one plain-text message
    ///
    /// # Errors
    ///
    /// Returns an error if the message could not be handed off.
    fn send(&self, to: &str, from: &str, subject: &str, body: &str) -> Result<()>;
}

/// Pipes messages to the local `sendmail -t`
#[derive(Debug, Clone)]
pub struct SendmailNotifier {
    /// Resolved sendmail binary
    program: PathBuf,
}

impl SendmailNotifier {
    /// Locate `sendmail` on `PATH`
    ///
    /// # Errors
    ///
    /// Returns an error if no `sendmail` binary can be found.
    pub fn from_path() -> Result<Self> {
        let program = which::which("sendmail").context("sendmail not found on PATH")?;
        Ok(Self { program })
    }

    /// Use an explicit sendmail-compatible binary
    #[must_use]
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Notifier for SendmailNotifier {
    fn send(&self, to: &str, from: &str, subject: &str, body: &str) -> Result<()> {
        let mut child = Command::new(&self.program)
            .arg("-t")
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit())
            .spawn()
            .with_context(|| format!("Failed to start {}", self.program.display()))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(compose_message(to, from, subject, body).as_bytes())
                .context("Failed to write message to sendmail")?;
        }

        let status = child.wait().context("Failed to wait for sendmail")?;
        if !status.success() {
            bail!("sendmail exited with {status}");
        }
        Ok(())
    }
}

/// Writes reports to the log instead of mailing them
pub struct LogNotifier<'a> {
    /// Destination of the report
    logger: &'a dyn ScanLogger,
}

impl<'a> LogNotifier<'a> {
    /// Report through `logger`
    #[must_use]
    pub fn new(logger: &'a dyn ScanLogger) -> Self {
        Self { logger }
    }
}

impl Notifier for LogNotifier<'_> {
    fn send(&self, to: &str, _from: &str, subject: &str, body: &str) -> Result<()> {
        self.logger.info(&format!("Report \"{subject}\" for {to}:\n{body}"));
        Ok(())
    }
}

/// Builds the RFC 822 message handed to `sendmail -t`.
#[must_use]
pub fn compose_message(to: &str, from: &str, subject: &str, body: &str) -> String {
    format!(
        "MIME-Version: 1.0\r\n\
         Content-Type: text/plain; charset=utf-8\r\n\
         X-Priority: 3\r\n\
         From: {from}\r\n\
         To: {to}\r\n\
         Subject: {subject}\r\n\
         \r\n\
         {body}"
    )
}
