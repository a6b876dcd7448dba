//! Command-line interface definition for joinery.
//!
//! - `joinery check` - Validate the configuration
//! - `joinery plan` - Resolve the build plan against the project tree
//! - `joinery watch` - Recompute the plan whenever sources or config change
//! - `joinery init` - Write a starter configuration

mod commands;
pub mod enums;
mod validation;

use clap::Parser;

pub use commands::{CheckArgs, Command, InitArgs, PlanArgs, ProjectArgs, WatchArgs};
pub use enums::*;
pub use validation::{parse_debounce, parse_plugin_name};

/// Joinery - build configuration resolver for front-end asset pipelines
#[derive(Parser, Debug)]
#[command(
    name = "joinery",
    version,
    about = "Validate and resolve front-end build configurations",
    long_about = "Joinery loads a declarative asset-pipeline configuration, validates it,\n\
                  and resolves which files are joined into which outputs, which plugins\n\
                  transform them, and which assets are copied verbatim."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
