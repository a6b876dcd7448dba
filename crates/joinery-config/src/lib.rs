//! Build configuration for joinery.
//!
//! Loads a project configuration, validates it, and resolves it into an
//! immutable [`BuildPlan`]: which files are joined into which output, which
//! plugins process them, and which assets are copied verbatim.

pub mod config;
pub mod discovery;
pub mod error;
pub mod model;
pub mod pattern;
pub mod plan;
pub mod plugin;
pub mod resolver;
pub mod scanner;
pub mod schema;
pub mod validation;

// Re-export main types
pub use config::*;
pub use error::*;
pub use model::*;
pub use plan::*;
pub use schema::*;

pub use pattern::{Pattern, PatternError};
pub use plugin::{
    BabelOptions, ElmOptions, InstalledPlugins, PluginBinding, PluginDescriptor, PluginOptions,
    PluginRegistry, PluginSchema,
};
pub use resolver::{load, resolve, Resolver};
pub use scanner::{FsScanner, SourceScanner, StaticScanner};

// Re-export discovery and validation
pub use discovery::ConfigDiscovery;
pub use validation::{validate_fs, validate_schema, ConfigValidator, FsValidator, SchemaValidator};
