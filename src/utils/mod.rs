//! Utility functions and helpers.
//!
//! - [`hash`]: content, attribute and path-key digests
//! - [`formatters`]: sizes, timestamps and status markers
//!
//! # Examples
//!
//! ```
//! use sfic::utils::{expand_tilde, format_size};
//!
//! # fn main() -> anyhow::Result<()> {
//! let path = expand_tilde("~/www")?;
//! let size = format_size(1_500); // "1.5 KB"
//! # Ok(())
//! # }
//! ```

/// Output formatting and colorization
pub mod formatters;
/// XXH3 based digests
pub mod hash;

pub use formatters::{format_datetime, format_size, format_timestamp};

use anyhow::Result;
use std::path::PathBuf;

/// Expands a path starting with `~` to the user's home directory.
///
/// # Errors
///
/// Returns an error if the path is empty.
pub fn expand_tilde(path: &str) -> Result<PathBuf> {
    if path.is_empty() {
        anyhow::bail!("Path cannot be empty");
    }
    if path.starts_with("~/")
        && let Some(home) = dirs::home_dir()
    {
        return Ok(home.join(&path[2..]));
    }
    Ok(PathBuf::from(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_tilde_plain_path() -> Result<()> {
        assert_eq!(expand_tilde("/var/www")?, PathBuf::from("/var/www"));
        Ok(())
    }

    #[test]
    fn test_expand_tilde_rejects_empty() {
        assert!(expand_tilde("").is_err());
    }
}
