//! Command-line interface definitions for sfic.
//!
//! The CLI definitions are shared between the main binary and build tools
//! (like xtask) for man page generation.
//!
//! Note: Field-level documentation is provided via clap doc comments, so we
//! allow `missing_docs` for this module to avoid redundant documentation.

#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

use crate::record::ScanMode;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Main CLI structure for sfic.
#[derive(Parser)]
#[command(
    name = "sfic",
    version = crate::VERSION,
    about = "Simple file integrity checker",
    long_about = "Scans directory trees, compares file fingerprints against the previous scan \
                  and reports added, changed and deleted files"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (default: <config dir>/sfic/config.toml)
    #[arg(short, long, global = true, env = crate::CONFIG_ENV)]
    pub config: Option<PathBuf>,

    /// Show debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only show warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// All available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Scan every configured directory, print the run report and notify
    Run {
        /// Lock file guarding against overlapping runs
        #[arg(long)]
        lock_file: Option<PathBuf>,

        /// Print the report without sending it
        #[arg(long)]
        no_notify: bool,
    },

    /// Scan one directory and update its snapshot
    Scan {
        /// Directory to scan
        dir: PathBuf,

        /// Checksum mode
        #[arg(short, long, value_enum, default_value_t = ScanMode::Attribute)]
        mode: ScanMode,

        /// Comma separated extensions, or "*" for every file
        #[arg(short, long, default_value = "*")]
        ext: String,

        /// One `A`/`M`/`D` line per file instead of the full report
        #[arg(short, long)]
        short: bool,
    },

    /// List the records stored in a directory's snapshot
    Show {
        /// Scanned directory (or the snapshot file itself)
        dir: PathBuf,
    },

    /// Validate the configuration file
    Check,

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
