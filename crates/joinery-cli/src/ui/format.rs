//! Formatting utilities for durations and plan summaries.

use std::fmt::Write as _;
use std::time::Duration;

use console::Term;
use joinery_config::BuildPlan;
use owo_colors::OwoColorize;

use super::colors_enabled;

/// Format duration in human-readable format.
///
/// ```
/// use std::time::Duration;
/// use joinery_cli::ui::format_duration;
///
/// assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
/// assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();

    if total_ms < 1000 {
        format!("{}ms", total_ms)
    } else if total_ms < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

/// Plain-text summary of a plan: one line per output file, then assets,
/// unowned files and watched paths.
pub fn plan_summary(plan: &BuildPlan) -> String {
    let mut out = String::new();

    for path in plan.artifact_paths() {
        let mut sources = 0;
        let mut plugins: Vec<&str> = Vec::new();
        for output in plan.outputs.iter().filter(|o| o.path == path) {
            sources += output.sources.len();
            for plugin in &output.plugins {
                if !plugins.contains(&plugin.as_str()) {
                    plugins.push(plugin);
                }
            }
        }

        let _ = write!(out, "  {}  {} {}", path.display(), sources, plural(sources, "source"));
        if !plugins.is_empty() {
            let _ = write!(out, "  [{}]", plugins.join(" → "));
        }
        out.push('\n');
    }

    if !plan.assets.is_empty() {
        let _ = writeln!(
            out,
            "  {} {} copied into {}",
            plan.assets.len(),
            plural(plan.assets.len(), "asset"),
            plan.public.display()
        );
    }

    for file in &plan.unowned {
        let chain = plan.chain_for(file);
        if chain.is_empty() {
            let _ = writeln!(out, "  unowned: {}", file);
        } else {
            let _ = writeln!(out, "  unowned: {} [{}]", file, chain.join(" → "));
        }
    }

    let watched: Vec<&str> = plan
        .watched
        .iter()
        .map(|w| if w.is_empty() { "." } else { w.as_str() })
        .collect();
    let _ = writeln!(out, "  watching: {}", watched.join(", "));

    out
}

/// Print the plan summary to stdout.
pub fn print_plan_summary(plan: &BuildPlan) {
    let width = Term::stdout().size().1 as usize;
    let title = "Build Plan";

    if colors_enabled() {
        println!("{}", title.bold().underline());
    } else {
        println!("{}", title);
    }
    println!("{}", "─".repeat(width.clamp(20, 80)));
    print!("{}", plan_summary(plan));
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}
