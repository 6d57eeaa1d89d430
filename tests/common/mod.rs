#![allow(dead_code)]

use anyhow::Result;
use filetime::{FileTime, set_file_mtime};
use sfic::config::ScanTarget;
use sfic::record::ScanMode;
use sfic::scanner::{DirectoryScanner, ExtensionFilter};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Monitored directory fixture for consistent test setup
pub struct TestSite {
    pub temp_dir: TempDir,
}

impl TestSite {
    /// Create an empty site directory
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
        })
    }

    /// Get the temporary directory path
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `rel` as the scanner reports it
    pub fn file(&self, rel: &str) -> String {
        self.path().join(rel).to_string_lossy().into_owned()
    }

    /// Write a file, creating parent directories
    pub fn write(&self, rel: &str, content: &str) -> Result<PathBuf> {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        Ok(path)
    }

    /// Write a file with a fixed modification time
    pub fn write_at(&self, rel: &str, content: &str, mtime: i64) -> Result<PathBuf> {
        let path = self.write(rel, content)?;
        set_file_mtime(&path, FileTime::from_unix_time(mtime, 0))?;
        Ok(path)
    }

    pub fn remove(&self, rel: &str) -> Result<()> {
        fs::remove_file(self.path().join(rel))?;
        Ok(())
    }

    /// Scanner over the whole site
    pub fn scanner(&self, mode: ScanMode, extensions: &str) -> DirectoryScanner {
        DirectoryScanner::new(self.path(), mode, ExtensionFilter::parse_list(extensions))
    }

    /// Config target over the whole site
    pub fn target(&self, mode: ScanMode, extensions: &[&str]) -> ScanTarget {
        ScanTarget::new(self.path(), mode, extensions)
    }

    /// Small PHP site with a nested library
    pub fn populate(&self) -> Result<()> {
        self.write("index.php", "<?php require 'lib/app.php';")?;
        self.write("lib/app.php", "<?php function app() {}")?;
        self.write("lib/vendor/db.php", "<?php // db")?;
        self.write("assets/site.js", "console.log('hi');")?;
        self.write("README.txt", "not monitored")?;
        Ok(())
    }
}

/// Writes `content` as a config file inside `dir`
pub fn write_config(dir: &Path, content: &str) -> Result<PathBuf> {
    let path = dir.join("config.toml");
    fs::write(&path, content)?;
    Ok(path)
}
