//! Watch command implementation.
//!
//! Resolves the plan once, then re-resolves it from scratch whenever the
//! configuration, the plugin manifest, or a file under a watched path
//! changes. A broken configuration is reported and the loop keeps running
//! so the next save can fix it.

use std::time::{Duration, Instant};

use crate::cli::WatchArgs;
use crate::commands::{plan, utils};
use crate::commands::utils::Project;
use crate::error::{CliError, Result, ResultExt};
use crate::ui;
use crate::watcher::{relative_path, FileChange, FileWatcher};
use joinery_config::{BuildPlan, Pattern};

/// Paths never worth a rebuild.
const IGNORED: &[&str] = &["/(^|/)node_modules//", "/(^|/)target//", "**/*.log", "**/*~"];

/// Execute the watch command.
pub async fn execute(args: WatchArgs) -> Result<()> {
    let mut project = Project::load(&args.project)?;
    project.root = project.root.canonicalize().with_path(&project.root)?;
    project.config_path = project
        .config_path
        .canonicalize()
        .with_path(&project.config_path)?;

    let ignore = IGNORED
        .iter()
        .map(|source| Pattern::parse(source))
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| CliError::Custom(format!("invalid ignore pattern: {e}")))?;

    let (watcher, mut rx) = FileWatcher::new(
        project.root.clone(),
        ignore,
        Duration::from_millis(args.debounce),
    )?;

    let mut watched = rebuild(&project);
    ui::info(&format!(
        "Watching {} for changes (Ctrl+C to stop)",
        watcher.root().display()
    ));

    loop {
        tokio::select! {
            change = rx.recv() => {
                let Some(change) = change else {
                    tracing::debug!("watcher channel closed");
                    break;
                };
                let Some(relative) = relative_path(change.path(), &project.root) else {
                    continue;
                };
                let config_file = relative_path(&project.config_path, &project.root);

                match classify(&relative, config_file.as_deref(), watched.as_deref()) {
                    Relevance::Irrelevant => continue,
                    Relevance::Config => {
                        ui::info(&format!("{} changed, reloading configuration", relative));
                        if let Err(e) = reload(&mut project, &args) {
                            report(&e);
                            watched = None;
                            continue;
                        }
                    }
                    Relevance::Source => {
                        tracing::debug!(file = %relative, change = kind(&change), "source changed");
                    }
                }
                watched = rebuild(&project);
            }
            _ = tokio::signal::ctrl_c() => {
                ui::info("Stopping watcher");
                break;
            }
        }
    }

    Ok(())
}

/// How a changed path affects the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Relevance {
    /// The configuration or the plugin manifest changed
    Config,
    /// A file under a watched path was added, changed or removed
    Source,
    Irrelevant,
}

/// Classify a project-relative path.
///
/// `watched` is `None` while the current configuration is broken; then
/// only configuration changes matter.
fn classify(relative: &str, config_file: Option<&str>, watched: Option<&[String]>) -> Relevance {
    if Some(relative) == config_file || relative == "package.json" {
        return Relevance::Config;
    }

    let Some(watched) = watched else {
        return Relevance::Irrelevant;
    };
    let under_watched = watched.iter().any(|dir| {
        dir.is_empty()
            || relative == dir
            || relative
                .strip_prefix(dir.as_str())
                .is_some_and(|rest| rest.starts_with('/'))
    });

    if under_watched {
        Relevance::Source
    } else {
        Relevance::Irrelevant
    }
}

fn reload(project: &mut Project, args: &WatchArgs) -> Result<()> {
    project.reload()?;
    project.registry = utils::plugin_registry(&project.root, &args.project.plugins)?;
    Ok(())
}

/// Recompute the plan and print it; returns the watched paths on success.
fn rebuild(project: &Project) -> Option<Vec<String>> {
    let start = Instant::now();
    match plan::resolve(project) {
        Ok(plan) => {
            print(&plan, start);
            Some(plan.watched)
        }
        Err(e) => {
            report(&e);
            None
        }
    }
}

fn print(plan: &BuildPlan, start: Instant) {
    ui::print_plan_summary(plan);
    ui::success(&format!(
        "Plan resolved in {}",
        ui::format_duration(start.elapsed())
    ));
}

fn report(err: &CliError) {
    match err {
        CliError::Config(config_err) => {
            for issue in config_err.issues() {
                ui::error(&issue.to_string());
            }
        }
        other => ui::error(&other.to_string()),
    }
}

fn kind(change: &FileChange) -> &'static str {
    match change {
        FileChange::Modified(_) => "modified",
        FileChange::Created(_) => "created",
        FileChange::Removed(_) => "removed",
    }
}
