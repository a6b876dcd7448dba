//! Command implementations for the joinery CLI.
//!
//! - [`check`] - Configuration validation
//! - [`plan`] - Build plan resolution
//! - [`watch`] - Re-resolution on file changes
//! - [`init`] - Starter configuration
//!
//! Each command provides an `execute` function that takes the parsed command
//! arguments and returns a Result.

pub mod check;
pub mod init;
pub mod plan;
pub mod watch;
mod templates;
pub(crate) mod utils;

pub use check::execute as check_execute;
pub use init::execute as init_execute;
pub use plan::execute as plan_execute;
pub use watch::execute as watch_execute;
