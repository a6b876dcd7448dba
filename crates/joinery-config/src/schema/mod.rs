//! Serde schema for the configuration file sections.
//!
//! These types mirror the wire format one-to-one and reject unknown keys.
//! Patterns stay as strings here; they are compiled during validation so
//! that every bad pattern can be reported in one pass.

mod files;
pub(crate) mod helpers;
mod modules;

use serde::{Deserialize, Serialize};

pub use files::{FileGroupConfig, JoinTo, OrderConfig};
pub use modules::{ModuleStyle, ModulesConfig};

use helpers::{
    default_assets, default_ignored, default_public, default_true, default_vendor,
    default_watched,
};

/// Path conventions that reclassify files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConventionsConfig {
    /// Files copied verbatim into the public directory
    #[serde(default = "default_assets")]
    pub assets: String,

    /// Files never processed nor copied (partials and the like)
    #[serde(default = "default_ignored")]
    pub ignored: String,

    /// Third-party files, concatenated ahead of application code
    #[serde(default = "default_vendor")]
    pub vendor: String,
}

impl Default for ConventionsConfig {
    fn default() -> Self {
        Self {
            assets: default_assets(),
            ignored: default_ignored(),
            vendor: default_vendor(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PathsConfig {
    /// Directories scanned for sources, relative to the project root
    #[serde(default = "default_watched")]
    pub watched: Vec<String>,

    /// Output directory for bundles and assets
    #[serde(default = "default_public")]
    pub public: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            watched: default_watched(),
            public: default_public(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NpmConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for NpmConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}
