use super::Config;
use anyhow::{Context, Result};
use std::path::Path;

/// Reads, parses and checks a configuration file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not UTF-8, is not valid
/// TOML for [`Config`], or fails [`validate_config`].
pub fn parse_config_file(path: &Path) -> Result<Config> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let content = simdutf8::basic::from_utf8(&bytes)
        .map_err(|e| anyhow::anyhow!("Invalid UTF-8 in config file {}: {e}", path.display()))?;

    parse_config_str(content)
        .with_context(|| format!("Invalid configuration in {}", path.display()))
}

/// Parses configuration text.
///
/// # Errors
///
/// Returns an error for invalid TOML or values rejected by [`validate_config`].
pub fn parse_config_str(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).context("Failed to parse TOML config")?;

    validate_config(&config)?;
    Ok(config)
}

/// Hard value checks. Softer problems are reported by the validator.
///
/// # Errors
///
/// Returns an error when the log settings cannot work.
pub fn validate_config(config: &Config) -> Result<()> {
    if config.log.max_size == 0 {
        anyhow::bail!("log.max_size must be greater than zero");
    }

    if config.log.level.trim().is_empty() {
        anyhow::bail!("log.level cannot be empty");
    }

    Ok(())
}
