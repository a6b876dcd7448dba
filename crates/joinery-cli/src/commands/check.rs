//! Check command implementation.
//!
//! Validates the configuration without scanning sources.

use crate::cli::CheckArgs;
use crate::commands::utils::Project;
use crate::error::{CliError, Result};
use crate::ui;
use joinery_config::{BuildConfig, ConfigError, ConfigValidator, FsValidator, SchemaValidator};

/// Execute the check command.
///
/// # Validation Steps
///
/// 1. Discover and load the configuration for the selected environment
/// 2. Validate patterns, join targets and plugins against the registry
/// 3. Check that watched paths exist (if `--fs`)
///
/// Every problem is printed; the command fails with
/// [`CliError::CheckFailed`] carrying the number of problems.
pub async fn execute(args: CheckArgs) -> Result<()> {
    let project = Project::load(&args.project)?;
    ui::info(&format!("Checking {}", project.config_path.display()));

    let result = if args.fs {
        FsValidator::new(&project.root, &project.registry).validate(&project.file)
    } else {
        SchemaValidator::new(&project.registry).validate(&project.file)
    };

    match result {
        Ok(build) => {
            ui::success(&summary(&build));
            Ok(())
        }
        Err(err) => Err(report(&err)),
    }
}

/// Print each problem behind `err` and turn it into a check failure.
fn report(err: &ConfigError) -> CliError {
    let issues = err.issues();
    for issue in &issues {
        ui::error(&issue.to_string());
    }
    CliError::CheckFailed(issues.len())
}

fn summary(build: &BuildConfig) -> String {
    format!(
        "Configuration is valid: {} file group(s), {} plugin(s), {} watched path(s)",
        build.groups.len(),
        build.plugins.len(),
        build.watched.len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ProjectArgs;
    use std::fs;
    use tempfile::TempDir;

    fn args(dir: &TempDir, fs_check: bool) -> CheckArgs {
        CheckArgs {
            project: ProjectArgs {
                cwd: Some(dir.path().to_path_buf()),
                ..ProjectArgs::default()
            },
            fs: fs_check,
        }
    }

    #[tokio::test]
    async fn valid_config_passes() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("joinery.toml"),
            "[files.javascripts]\njoinTo = \"js/app.js\"\n",
        )
        .unwrap();

        execute(args(&dir, false)).await.unwrap();
    }

    #[tokio::test]
    async fn problems_are_counted() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("joinery.json"),
            r#"{
                "files": { "javascripts": {} },
                "plugins": { "babel": {} }
            }"#,
        )
        .unwrap();

        let err = execute(args(&dir, false)).await.unwrap_err();
        assert!(matches!(err, CliError::CheckFailed(2)));
    }

    #[tokio::test]
    async fn fs_check_requires_watched_paths() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("joinery.json"),
            r#"{ "paths": { "watched": ["js"] } }"#,
        )
        .unwrap();

        execute(args(&dir, false)).await.unwrap();
        let err = execute(args(&dir, true)).await.unwrap_err();
        assert!(matches!(err, CliError::CheckFailed(1)));

        fs::create_dir(dir.path().join("js")).unwrap();
        execute(args(&dir, true)).await.unwrap();
    }
}
