/// TOML parsing and value checks
pub mod parser;
/// Unknown-key and semantic warnings
pub mod validator;

use crate::record::ScanMode;
use crate::scanner::{DirectoryScanner, ExtensionFilter};
use crate::utils::expand_tilde;
use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};

/// Config file path relative to the platform config directory.
pub const DEFAULT_CONFIG_PATH: &str = "sfic/config.toml";

/// Lock file name used when none is configured.
pub const DEFAULT_LOCK_FILE: &str = "sfic.lock";

/// Top-level configuration file
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Single-instance lock; defaults to `sfic.lock` beside the config file
    #[serde(default)]
    pub lock_file: Option<PathBuf>,

    /// Directories to monitor, scanned in this order
    #[serde(default)]
    pub scan: Vec<ScanTarget>,

    /// Report delivery
    #[serde(default)]
    pub notify: NotifyConfig,

    /// Log sink and rotation
    #[serde(default)]
    pub log: LogConfig,
}

/// One monitored directory
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ScanTarget {
    /// Directory to scan
    #[serde(default)]
    pub dir: Option<PathBuf>,
    /// Checksum mode
    #[serde(default)]
    pub mode: ScanMode,
    /// Either `"php,js"` or `["php", "js"]`; empty matches nothing
    #[serde(default, deserialize_with = "deserialize_extensions")]
    pub extensions: Vec<String>,
}

/// Where the run report is sent
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NotifyConfig {
    /// Recipient address
    #[serde(default)]
    pub to: Option<String>,
    /// Sender address
    #[serde(default)]
    pub from: Option<String>,
    /// Message subject
    #[serde(default = "default_subject")]
    pub subject: String,
    /// Send a report even when no directory changed or failed
    #[serde(default)]
    pub always: bool,
}

/// Log output settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LogConfig {
    /// Log file; stderr when unset
    #[serde(default)]
    pub file: Option<PathBuf>,
    /// Default filter directive when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Rotate once the file reaches this many bytes
    #[serde(default = "default_max_size")]
    pub max_size: u64,
    /// Rotated files to keep
    #[serde(default = "default_keep")]
    pub keep: usize,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            to: None,
            from: None,
            subject: default_subject(),
            always: false,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: None,
            level: default_log_level(),
            max_size: default_max_size(),
            keep: default_keep(),
        }
    }
}

impl ScanTarget {
    /// Creates a target for `dir`
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, mode: ScanMode, extensions: &[&str]) -> Self {
        Self {
            dir: Some(dir.into()),
            mode,
            extensions: extensions.iter().map(ToString::to_string).collect(),
        }
    }

    /// Extension filter for this target
    #[must_use]
    pub fn filter(&self) -> ExtensionFilter {
        ExtensionFilter::new(&self.extensions)
    }

    /// Scanner for this target, `None` when no directory is set.
    ///
    /// A leading `~` in the directory is expanded to the home directory.
    #[must_use]
    pub fn scanner(&self) -> Option<DirectoryScanner> {
        let dir = self.dir.as_ref().filter(|dir| !dir.as_os_str().is_empty())?;
        let dir = dir
            .to_str()
            .and_then(|s| expand_tilde(s).ok())
            .unwrap_or_else(|| dir.clone());
        Some(DirectoryScanner::new(dir, self.mode, self.filter()))
    }
}

impl NotifyConfig {
    /// Recipient and sender, when both are set and non-empty
    #[must_use]
    pub fn addresses(&self) -> Option<(&str, &str)> {
        let to = self.to.as_deref().filter(|s| !s.trim().is_empty())?;
        let from = self.from.as_deref().filter(|s| !s.trim().is_empty())?;
        Some((to, from))
    }
}

impl Config {
    /// Load configuration from a file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file does not exist
    /// - Cannot read or parse the configuration file
    /// - Configuration file contains invalid TOML or invalid values
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!("Configuration file not found: {}", path.display());
        }

        parser::parse_config_file(path)
    }

    /// Default config location: `<config dir>/sfic/config.toml`
    ///
    /// # Errors
    ///
    /// Returns an error if the platform config directory cannot be determined.
    pub fn default_path() -> Result<PathBuf> {
        let base = dirs::config_dir().context("Could not find config directory")?;
        Ok(base.join(DEFAULT_CONFIG_PATH))
    }

    /// Lock file for a config loaded from `config_path`
    #[must_use]
    pub fn lock_path(&self, config_path: &Path) -> PathBuf {
        self.lock_file.clone().unwrap_or_else(|| {
            config_path
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .join(DEFAULT_LOCK_FILE)
        })
    }
}

/// Accepts a comma separated string or an array of strings.
fn deserialize_extensions<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ExtensionList {
        Csv(String),
        List(Vec<String>),
    }

    Ok(match ExtensionList::deserialize(deserializer)? {
        ExtensionList::Csv(csv) => csv
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
            .collect(),
        ExtensionList::List(list) => list,
    })
}

// Default functions for serde
fn default_subject() -> String {
    "File monitoring".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

const fn default_max_size() -> u64 {
    5_000_000
}

const fn default_keep() -> usize {
    2
}
