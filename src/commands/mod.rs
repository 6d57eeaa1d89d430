//! Command implementations behind the `sfic` binary.

/// Configuration validation
pub mod check;
/// Full configured run
pub mod run;
/// Ad-hoc scan of one directory
pub mod scan;
/// Snapshot listing
pub mod show;

use crate::output::{Verbosity, get_verbosity};
use colored::Colorize;

/// Prints a success message with a green check mark (respects quiet mode).
pub fn print_success(message: &str) {
    if get_verbosity() == Verbosity::Quiet {
        return;
    }
    println!("{} {}", "✓".green().bold(), message);
}

/// Prints an informational message with a blue marker (respects quiet mode).
pub fn print_info(message: &str) {
    if get_verbosity() == Verbosity::Quiet {
        return;
    }
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Prints a warning with a yellow marker.
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}
