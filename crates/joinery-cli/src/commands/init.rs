//! Init command implementation.
//!
//! Writes a starter configuration into the project root.

use crate::cli::InitArgs;
use crate::commands::{templates, utils};
use crate::error::{CliError, Result};
use crate::ui;
use joinery_config::ConfigDiscovery;
use std::fs;

/// Execute the init command.
///
/// # Errors
///
/// Returns [`CliError::InvalidArgument`] if the target file, or any other
/// configuration the project would pick up first, already exists and
/// `--force` was not given.
pub async fn execute(args: InitArgs) -> Result<()> {
    let root = utils::project_root(args.cwd.as_deref())?;
    let path = root.join(args.format.file_name());

    if !args.force {
        if path.exists() {
            return Err(CliError::InvalidArgument(format!(
                "{} already exists (use --force to overwrite)",
                path.display()
            )));
        }
        if let Some(existing) = ConfigDiscovery::new(&root).find() {
            return Err(CliError::InvalidArgument(format!(
                "project is already configured by {} (use --force to write {} anyway)",
                existing.display(),
                args.format.file_name()
            )));
        }
    }

    fs::write(&path, templates::starter_config(args.format))?;
    tracing::debug!(path = %path.display(), "starter configuration written");

    ui::success(&format!("Created {}", path.display()));
    ui::info("Run `joinery check --fs` once the watched directories exist");
    Ok(())
}
