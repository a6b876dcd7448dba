//! The resolved build plan handed to the pipeline executor.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::model::ModuleSettings;
use crate::plugin::PluginOptions;

/// Immutable mapping from inputs to outputs and transforms.
///
/// A plan is recomputed from scratch whenever the configuration changes;
/// nothing in it is ever updated in place.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildPlan {
    pub watched: Vec<String>,
    pub public: PathBuf,
    /// One binding per (group, output), in group then target declaration order
    pub outputs: Vec<OutputBinding>,
    pub assets: Vec<AssetCopy>,
    /// Plugins in execution order with the files each one processes
    pub plugins: Vec<PluginPlan>,
    /// Processed files no group joins anywhere
    pub unowned: Vec<String>,
    pub modules: ModuleSettings,
    pub npm_enabled: bool,
    pub optimize: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputBinding {
    pub group: String,
    /// Output as declared in `joinTo`
    pub target: String,
    /// Output inside the public directory
    pub path: PathBuf,
    /// Sources in concatenation order
    pub sources: Vec<String>,
    /// Plugins applied to at least one source, in execution order
    pub plugins: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetCopy {
    pub source: String,
    pub destination: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PluginPlan {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    pub options: PluginOptions,
    pub files: Vec<String>,
}

impl BuildPlan {
    /// Plugins `file` passes through, in execution order.
    pub fn chain_for(&self, file: &str) -> Vec<&str> {
        self.plugins
            .iter()
            .filter(|plugin| plugin.files.iter().any(|f| f == file))
            .map(|plugin| plugin.name.as_str())
            .collect()
    }

    /// Bindings that write into `target`, in plan order.
    pub fn outputs_for<'a>(&'a self, target: &'a str) -> impl Iterator<Item = &'a OutputBinding> {
        self.outputs.iter().filter(move |o| o.target == target)
    }

    /// Distinct output files, in the order they first appear.
    pub fn artifact_paths(&self) -> Vec<&Path> {
        let mut paths: Vec<&Path> = Vec::new();
        for output in &self.outputs {
            if !paths.contains(&output.path.as_path()) {
                paths.push(&output.path);
            }
        }
        paths
    }

    /// Number of source files joined into some output.
    pub fn source_count(&self) -> usize {
        self.outputs.iter().map(|o| o.sources.len()).sum()
    }
}
