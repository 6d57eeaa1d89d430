use crate::SficContext;
use crate::config::validator::ConfigValidator;
use anyhow::Result;

/// Validates the loaded configuration and prints every warning.
///
/// Returns the number of warnings found.
///
/// # Errors
///
/// Returns an error if the configuration file cannot be re-read.
pub fn execute(ctx: &SficContext) -> Result<usize> {
    let warnings = ConfigValidator::new().validate_config_file(&ctx.config_path, &ctx.config)?;

    for warning in &warnings {
        super::print_warning(warning);
    }

    if warnings.is_empty() {
        super::print_success(&format!(
            "{} is valid ({} scan targets)",
            ctx.config_path.display(),
            ctx.config.scan.len()
        ));
    } else {
        super::print_info(&format!("{} warnings", warnings.len()));
    }

    Ok(warnings.len())
}
