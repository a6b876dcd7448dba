//! Validated configuration, ready for resolution.
//!
//! Produced by [`crate::SchemaValidator`]; every pattern is compiled and every
//! plugin is typed, so nothing here can fail at resolution time.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;

use crate::pattern::Pattern;
use crate::plugin::PluginBinding;
use crate::schema::ModuleStyle;

#[derive(Debug, Clone, PartialEq)]
pub struct BuildConfig {
    /// File groups in declaration order
    pub groups: Vec<FileGroup>,
    pub conventions: Conventions,
    /// Normalised watched paths; an empty string stands for the project root
    pub watched: Vec<String>,
    pub public: PathBuf,
    /// Plugins in declaration (execution) order
    pub plugins: Vec<PluginBinding>,
    pub modules: ModuleSettings,
    pub npm_enabled: bool,
    pub optimize: bool,
}

impl BuildConfig {
    /// Whether `path` lies inside one of the watched paths.
    pub fn is_watched(&self, path: &str) -> bool {
        self.watched.iter().any(|dir| {
            dir.is_empty()
                || path == dir
                || path
                    .strip_prefix(dir.as_str())
                    .is_some_and(|rest| rest.starts_with('/'))
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Conventions {
    pub assets: Pattern,
    pub ignored: Pattern,
    pub vendor: Pattern,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleSettings {
    pub wrapper: ModuleStyle,
    pub definition: ModuleStyle,
    pub auto_require: IndexMap<String, Vec<String>>,
}

/// Where a group's files are concatenated.
#[derive(Debug, Clone, PartialEq)]
pub enum JoinTarget {
    Single(String),
    /// First matching pattern wins
    Routed(Vec<(Pattern, String)>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FileGroup {
    pub name: String,
    pub sources: Vec<Pattern>,
    pub target: JoinTarget,
    pub order: OrderRules,
}

impl FileGroup {
    /// The output `path` is joined into, if this group owns it.
    pub fn route(&self, path: &str) -> Option<&str> {
        if !self.sources.iter().any(|p| p.is_match(path)) {
            return None;
        }

        match &self.target {
            JoinTarget::Single(target) => Some(target.as_str()),
            JoinTarget::Routed(routes) => routes
                .iter()
                .find(|(pattern, _)| pattern.is_match(path))
                .map(|(_, target)| target.as_str()),
        }
    }

    /// Every output this group can produce, in declaration order, without
    /// duplicates.
    pub fn targets(&self) -> Vec<&str> {
        match &self.target {
            JoinTarget::Single(target) => vec![target.as_str()],
            JoinTarget::Routed(routes) => {
                let mut targets: Vec<&str> = Vec::with_capacity(routes.len());
                for (_, target) in routes {
                    if !targets.contains(&target.as_str()) {
                        targets.push(target.as_str());
                    }
                }
                targets
            }
        }
    }
}

/// Concatenation order inside one output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderRules {
    pub before: Vec<Pattern>,
    pub after: Vec<Pattern>,
}

impl OrderRules {
    /// Stable sort: `before` matches (by rule), vendor files, everything
    /// else, then `after` matches (by rule).
    pub fn arrange(&self, files: &mut [String], vendor: &Pattern) {
        files.sort_by_key(|file| {
            if let Some(rule) = self.before.iter().position(|p| p.is_match(file)) {
                (0, rule)
            } else if let Some(rule) = self.after.iter().position(|p| p.is_match(file)) {
                (3, rule)
            } else if vendor.is_match(file) {
                (1, 0)
            } else {
                (2, 0)
            }
        });
    }
}

/// Artifact type of an output path: its lowercased extension.
pub(crate) fn artifact_type(target: &str) -> String {
    Path::new(target)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default()
}
