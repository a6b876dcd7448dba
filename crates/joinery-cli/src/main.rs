//! Joinery CLI entry point: argument parsing, logging setup and dispatch.

use clap::Parser;
use joinery_cli::{cli, commands, error, logger, ui};
use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let result = match args.command {
        cli::Command::Check(check_args) => commands::check_execute(check_args).await,
        cli::Command::Plan(plan_args) => commands::plan_execute(plan_args).await,
        cli::Command::Watch(watch_args) => commands::watch_execute(watch_args).await,
        cli::Command::Init(init_args) => commands::init_execute(init_args).await,
    };

    // Convert CLI errors to miette diagnostics for reporting
    result.map_err(error::cli_error_to_miette)
}
