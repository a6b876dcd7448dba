//! Joinery CLI - validate and resolve front-end build configurations.
//!
//! This crate wraps `joinery-config` in a command-line tool: it discovers
//! the configuration, validates it, resolves it against the project tree
//! and keeps the plan current while files change.
//!
//! # Architecture
//!
//! - [`cli`] - Argument definitions
//! - [`error`] - Error types and miette diagnostics
//! - [`logger`] - Structured logging with tracing
//! - [`ui`] - Status messages and plan summaries
//! - [`watcher`] - Debounced file watching
//! - `commands` - Individual command implementations
//!
//! # Example
//!
//! ```rust
//! use joinery_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod ui;
pub mod watcher;

pub use error::{CliError, ConfigError, Result, ResultExt};
