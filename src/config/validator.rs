use super::Config;
use anyhow::Result;
use std::collections::HashSet;
use std::path::Path;

/// Finds configuration mistakes that do not stop a run.
pub struct ConfigValidator {
    /// Keys recognized at the top level and inside sections
    known_fields: HashSet<&'static str>,
    /// Keys recognized inside each `[[scan]]` entry
    scan_fields: HashSet<&'static str>,
}

impl ConfigValidator {
    /// Create a new validator with known configuration fields
    #[must_use]
    pub fn new() -> Self {
        let known_fields = [
            "lock_file",
            "scan",
            "notify",
            "notify.to",
            "notify.from",
            "notify.subject",
            "notify.always",
            "log",
            "log.file",
            "log.level",
            "log.max_size",
            "log.keep",
        ]
        .into_iter()
        .collect();

        let scan_fields = ["dir", "mode", "extensions"].into_iter().collect();

        Self {
            known_fields,
            scan_fields,
        }
    }

    /// Reads the raw file and lists unknown keys.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub fn unknown_fields_in_file(&self, config_path: &Path) -> Result<Vec<String>> {
        let content = std::fs::read_to_string(config_path)?;
        let parsed: toml::Value = toml::from_str(&content)?;

        let mut unknown = Vec::new();
        self.check_table(&parsed, "", &mut unknown);
        Ok(unknown)
    }

    /// All warnings for a config file: unknown keys first, then semantic issues.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub fn validate_config_file(&self, config_path: &Path, config: &Config) -> Result<Vec<String>> {
        let mut warnings: Vec<String> = self
            .unknown_fields_in_file(config_path)?
            .into_iter()
            .map(|field| format!("Unknown configuration field: {field}"))
            .collect();
        warnings.extend(Self::semantic_warnings(config));
        Ok(warnings)
    }

    /// Problems in an already parsed config
    #[must_use]
    pub fn semantic_warnings(config: &Config) -> Vec<String> {
        let mut warnings = Vec::new();

        if config.scan.is_empty() {
            warnings.push("No [[scan]] targets configured; nothing will be scanned".to_string());
        }

        for (i, target) in config.scan.iter().enumerate() {
            match &target.dir {
                Some(dir) if !dir.as_os_str().is_empty() => {
                    if target.filter().is_empty() {
                        warnings.push(format!(
                            "scan #{i} ({}): no extensions configured, no file will match \
                             (use \"*\" to match every file)",
                            dir.display()
                        ));
                    }
                }
                _ => warnings.push(format!("scan #{i}: 'dir' is not set")),
            }
        }

        let notify = &config.notify;
        if notify.addresses().is_none() && (notify.to.is_some() || notify.from.is_some()) {
            warnings.push(
                "notify: both 'to' and 'from' are required, reports will not be sent".to_string(),
            );
        }

        warnings
    }

    /// Recursively collects keys that are neither known fields nor sections
    fn check_table(&self, table: &toml::Value, prefix: &str, unknown: &mut Vec<String>) {
        let toml::Value::Table(map) = table else {
            return;
        };

        for (key, value) in map {
            let full_key = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{prefix}.{key}")
            };

            if full_key == "scan" {
                self.check_scan_entries(value, unknown);
                continue;
            }

            if !self.known_fields.contains(full_key.as_str()) {
                unknown.push(full_key);
            } else if let toml::Value::Table(_) = value {
                self.check_table(value, &full_key, unknown);
            }
        }
    }

    /// Checks the keys of every `[[scan]]` entry
    fn check_scan_entries(&self, value: &toml::Value, unknown: &mut Vec<String>) {
        let toml::Value::Array(entries) = value else {
            unknown.push("scan (expected an array of tables)".to_string());
            return;
        };

        for (i, entry) in entries.iter().enumerate() {
            if let toml::Value::Table(map) = entry {
                for key in map.keys() {
                    if !self.scan_fields.contains(key.as_str()) {
                        unknown.push(format!("scan[{i}].{key}"));
                    }
                }
            }
        }
    }
}

impl Default for ConfigValidator {
    fn default() -> Self {
        Self::new()
    }
}
