use anyhow::Result;
use memmap2::MmapOptions;
use std::fs::File;
use std::path::Path;
use xxhash_rust::xxh3::{xxh3_64, xxh3_128};

/// Files at or above this size are hashed through a memory map.
pub const MMAP_THRESHOLD: u64 = 1_048_576;

/// Computes the XXH3 128-bit hash of raw bytes as 32 lowercase hex chars.
#[must_use]
pub fn hash_bytes(data: &[u8]) -> String {
    let hash = xxh3_128(data);
    format!("{hash:032x}")
}

/// Hashes the full content of a file.
///
/// # Errors
///
/// Returns an error if the file cannot be opened, mapped or read.
pub fn hash_file(path: &Path) -> Result<String> {
    let file = File::open(path)?;
    let metadata = file.metadata()?;

    if metadata.len() == 0 {
        return Ok(hash_bytes(b""));
    }

    if metadata.len() < MMAP_THRESHOLD {
        let content = std::fs::read(path)?;
        Ok(hash_bytes(&content))
    } else {
        // SAFETY: the map is read-only and dropped before returning. A file
        // truncated underneath us can fault, which is the accepted mmap risk.
        let mmap = unsafe { MmapOptions::new().map(&file)? };
        Ok(hash_bytes(&mmap))
    }
}

/// Hashes file metadata only: the decimal size and mtime joined by `:`.
#[must_use]
pub fn hash_attributes(size: u64, modified_at: i64) -> String {
    hash_bytes(format!("{size}:{modified_at}").as_bytes())
}

/// Fixed-width key for a record path (XXH3 64-bit, 16 hex chars).
///
/// Only used to key maps, never for integrity.
#[must_use]
pub fn path_key(path: &str) -> String {
    format!("{:016x}", xxh3_64(path.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_hash_bytes() {
        let data = b"Hello, World!";
        let hash1 = hash_bytes(data);
        let hash2 = hash_bytes(data);
        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 32);

        let hash3 = hash_bytes(b"Different data");
        assert_ne!(hash1, hash3);
    }

    #[test]
    fn test_hash_file_matches_bytes() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("index.php");
        std::fs::write(&file_path, "<?php echo 1;")?;

        assert_eq!(hash_file(&file_path)?, hash_bytes(b"<?php echo 1;"));
        Ok(())
    }

    #[test]
    fn test_hash_large_file_uses_same_digest() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("big.bin");
        let content = vec![b'x'; 2 * 1_048_576];
        std::fs::write(&file_path, &content)?;

        assert_eq!(hash_file(&file_path)?, hash_bytes(&content));
        Ok(())
    }

    #[test]
    fn test_hash_empty_file() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("empty.php");
        std::fs::write(&file_path, "")?;

        assert_eq!(hash_file(&file_path)?, hash_bytes(b""));
        Ok(())
    }

    #[test]
    fn test_hash_attributes_depends_on_both_fields() {
        assert_eq!(hash_attributes(100, 1000), hash_attributes(100, 1000));
        assert_ne!(hash_attributes(100, 1000), hash_attributes(100, 1001));
        assert_ne!(hash_attributes(100, 1000), hash_attributes(200, 1000));
    }

    #[test]
    fn test_hash_attributes_fields_do_not_run_together() {
        assert_ne!(hash_attributes(1, 23), hash_attributes(12, 3));
        assert_eq!(hash_attributes(1, 23), hash_bytes(b"1:23"));
    }

    #[test]
    fn test_path_key_is_fixed_width() {
        let short = path_key("a.php");
        let long = path_key(&"very/long/path/".repeat(100));
        assert_eq!(short.len(), 16);
        assert_eq!(long.len(), 16);
        assert_ne!(short, long);
        assert_eq!(short, path_key("a.php"));
    }
}
