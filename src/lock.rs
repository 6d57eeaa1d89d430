//! Single-instance run lock
//!
//! Scans rewrite snapshot files in place, so two overlapping runs against the
//! same directories would read each other's half-written snapshots. `sfic run`
//! holds a [`RunLock`] for its whole duration. The lock is released when dropped.

use anyhow::{Context, Result, bail};
use fs4::fs_std::FileExt;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Holds an exclusive lock on the run lock file
pub struct RunLock {
    /// Lock file handle
    lock_file: File,
    /// Path to the lock file (for error messages)
    lock_path: PathBuf,
}

impl RunLock {
    /// Acquire the lock without waiting
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The lock file or its parent directory cannot be created
    /// - Another run already holds the lock
    pub fn acquire(lock_path: &Path) -> Result<Self> {
        if let Some(parent) = lock_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create lock directory: {}", parent.display())
            })?;
        }

        // Opening must not truncate: the holder's pid lives in this file.
        let file = File::options()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(lock_path)
            .with_context(|| format!("Failed to open lock file: {}", lock_path.display()))?;

        match file.try_lock_exclusive() {
            Ok(true) => {}
            Ok(false) | Err(_) => bail!(
                "Another sfic run is already in progress (lock held on {})",
                lock_path.display()
            ),
        }

        file.set_len(0)
            .with_context(|| format!("Failed to reset lock file: {}", lock_path.display()))?;
        let mut file_ref = &file;
        let _ = writeln!(
            file_ref,
            "pid={}\ntime={}",
            std::process::id(),
            humantime::format_rfc3339_seconds(SystemTime::now())
        );

        Ok(Self {
            lock_file: file,
            lock_path: lock_path.to_path_buf(),
        })
    }

    /// Path of the lock file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.lock_path
    }

    /// Release the lock explicitly (normally handled by Drop)
    ///
    /// # Errors
    ///
    /// Returns an error if the unlock operation fails
    pub fn release(self) -> Result<()> {
        self.lock_file.unlock()?;
        Ok(())
    }
}

impl Drop for RunLock {
    fn drop(&mut self) {
        let _ = self.lock_file.unlock();
    }
}
