use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::cli::enums::ConfigFormat;
use crate::cli::validation::{parse_debounce, parse_plugin_name};

/// Available joinery subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate the configuration
    ///
    /// Loads the configuration, applies the selected environment override,
    /// and reports every problem found in one pass.
    Check(CheckArgs),

    /// Resolve and print the build plan
    ///
    /// Scans the watched paths and shows which sources are joined into each
    /// output, which plugins process them, and which assets are copied.
    Plan(PlanArgs),

    /// Recompute the build plan on every change
    ///
    /// Watches the configuration file and the watched paths. Each change
    /// discards the current plan and resolves a new one.
    Watch(WatchArgs),

    /// Write a starter configuration
    Init(InitArgs),
}

/// Options shared by every command that loads a project.
#[derive(Args, Debug, Clone, Default)]
pub struct ProjectArgs {
    /// Configuration file to load
    ///
    /// Relative paths are resolved against --cwd. Without this option
    /// joinery.toml, joinery.json and the `joinery` field of package.json
    /// are tried in that order.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Environment whose `overrides` entry is applied
    ///
    /// Falls back to the JOINERY_ENV environment variable.
    #[arg(short, long, value_name = "NAME", env = "JOINERY_ENV")]
    pub env: Option<String>,

    /// Project root (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Treat a plugin as installed even if package.json does not list it
    ///
    /// Examples:
    ///   --plugin babel --plugin elmBrunch
    #[arg(short, long = "plugin", value_name = "NAME", value_parser = parse_plugin_name)]
    pub plugins: Vec<String>,
}

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Also check that every watched path exists on disk
    #[arg(long)]
    pub fs: bool,
}

/// Arguments for the plan command
#[derive(Args, Debug)]
pub struct PlanArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Print the plan as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the watch command
#[derive(Args, Debug)]
pub struct WatchArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Ignore repeated events for the same file within this many milliseconds
    #[arg(long, default_value = "100", value_name = "MS", value_parser = parse_debounce)]
    pub debounce: u64,
}

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to write the configuration into
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// File format of the starter configuration
    #[arg(short, long, value_enum, default_value = "toml")]
    pub format: ConfigFormat,

    /// Overwrite an existing configuration file
    #[arg(long)]
    pub force: bool,
}
