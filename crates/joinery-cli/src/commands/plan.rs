//! Plan command implementation.

use std::time::Instant;

use crate::cli::PlanArgs;
use crate::commands::utils::Project;
use crate::error::Result;
use crate::ui;
use joinery_config::{BuildPlan, FsScanner, Resolver};

/// Execute the plan command.
///
/// Resolves the configuration against the files under the watched paths and
/// prints the plan, either as a summary or (with `--json`) as JSON on stdout.
pub async fn execute(args: PlanArgs) -> Result<()> {
    let project = Project::load(&args.project)?;

    let start = Instant::now();
    let plan = resolve(&project)?;
    tracing::debug!(
        outputs = plan.outputs.len(),
        sources = plan.source_count(),
        assets = plan.assets.len(),
        elapsed = %ui::format_duration(start.elapsed()),
        "plan resolved"
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        ui::print_plan_summary(&plan);
    }
    Ok(())
}

/// Resolve the project's current configuration against its source tree.
pub(crate) fn resolve(project: &Project) -> Result<BuildPlan> {
    let scanner = FsScanner::new(&project.root);
    let plan = Resolver::new(&project.registry, &scanner).load_file(&project.file)?;
    Ok(plan)
}
