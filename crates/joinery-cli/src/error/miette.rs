//! Miette diagnostic conversion for CLI errors.

use super::{CliError, ConfigError};
use ::miette::Report;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Config(e) => config_error_to_miette(e),
        CliError::CheckFailed(count) => ::miette::miette!(
            help = "Fix the problems listed above and run `joinery check` again",
            "configuration check failed with {} problem(s)",
            count
        ),
        _ => ::miette::miette!("{}", err),
    }
}

/// Convert a configuration error to a miette Report with a hint, when one
/// applies.
pub fn config_error_to_miette(err: ConfigError) -> Report {
    let err = match err {
        ConfigError::Invalid(mut issues) if issues.len() == 1 => issues.remove(0),
        other => other,
    };

    match &err {
        ConfigError::NotFound => ::miette::miette!(
            help = "Create joinery.toml with `joinery init`, or pass --config <FILE>",
            "Configuration error: {}",
            err
        ),
        ConfigError::UnknownPlugin { name, .. } => ::miette::miette!(
            help = format!(
                "Install the plugin with npm, or register it with --plugin {}",
                name
            ),
            "Configuration error: {}",
            err
        ),
        _ => ::miette::miette!("Configuration error: {}", err),
    }
}
