use crate::events::TracingLogger;
use crate::storage::{load, snapshot_path};
use crate::utils::{format_size, format_timestamp};
use anyhow::{Result, bail};
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Lists the records of a directory's snapshot, in file order.
///
/// # Errors
///
/// Returns an error if no snapshot exists at the given location.
pub fn execute(target: &Path) -> Result<()> {
    let path = resolve(target);
    if !path.is_file() {
        bail!("No snapshot found at {}", path.display());
    }

    let index = load(&path, &TracingLogger);
    if index.is_empty() {
        super::print_info("Snapshot is empty");
        return Ok(());
    }

    for record in index.remaining() {
        println!(
            "{} {:>10}  {}  {}",
            record.checksum().yellow(),
            format_size(record.size()),
            format_timestamp(record.modified_at()).dimmed(),
            record.path()
        );
    }

    println!();
    println!("{} records", index.len());
    Ok(())
}

/// A directory means its `data.sfic`; anything else is taken as the snapshot itself.
fn resolve(target: &Path) -> PathBuf {
    if target.is_dir() {
        snapshot_path(target)
    } else {
        target.to_path_buf()
    }
}
