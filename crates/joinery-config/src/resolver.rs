//! Build plan resolution.
//!
//! Turns a validated [`BuildConfig`] and a file list into a [`BuildPlan`]:
//! ignored files are dropped, assets are set aside for verbatim copying, and
//! every processed file gets a plugin chain and at most one output per
//! artifact type.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use serde_json::Value;

use crate::config::ConfigFile;
use crate::error::{ConfigError, Result};
use crate::model::{artifact_type, BuildConfig};
use crate::plan::{AssetCopy, BuildPlan, OutputBinding, PluginPlan};
use crate::plugin::PluginRegistry;
use crate::scanner::SourceScanner;
use crate::validation::{ConfigValidator, SchemaValidator};

/// Loads configurations into build plans using the given collaborators.
///
/// # Example
///
/// ```
/// use joinery_config::{InstalledPlugins, Resolver, StaticScanner};
/// use serde_json::json;
///
/// let registry = InstalledPlugins::new().with("babel");
/// let scanner = StaticScanner::new(["js/a.js", "js/b.js", "static/logo.png"]);
///
/// let plan = Resolver::new(&registry, &scanner)
///     .load(json!({
///         "files": { "javascripts": { "joinTo": "js/app.js" } },
///         "conventions": { "assets": "/^(static)/" },
///         "paths": { "watched": ["static", "js"], "public": "priv/static" },
///         "plugins": { "babel": {} }
///     }))
///     .unwrap();
///
/// assert_eq!(plan.outputs[0].sources, vec!["js/a.js", "js/b.js"]);
/// assert_eq!(plan.assets[0].destination.to_str(), Some("priv/static/logo.png"));
/// assert_eq!(plan.chain_for("js/a.js"), vec!["babel"]);
/// ```
pub struct Resolver<'a> {
    registry: &'a dyn PluginRegistry,
    scanner: &'a dyn SourceScanner,
    env: Option<String>,
}

impl<'a> Resolver<'a> {
    pub fn new(registry: &'a dyn PluginRegistry, scanner: &'a dyn SourceScanner) -> Self {
        Self {
            registry,
            scanner,
            env: None,
        }
    }

    /// Apply `overrides.<env>` to raw configurations before validation.
    pub fn with_env(mut self, env: Option<impl Into<String>>) -> Self {
        self.env = env.map(Into::into);
        self
    }

    /// Parse, validate and resolve a raw configuration value.
    pub fn load(&self, raw: Value) -> Result<BuildPlan> {
        let file = ConfigFile::from_value_for_env(raw, self.env.as_deref())?;
        self.load_file(&file)
    }

    /// Validate and resolve an already parsed configuration file.
    pub fn load_file(&self, file: &ConfigFile) -> Result<BuildPlan> {
        let config = SchemaValidator::new(self.registry).validate(file)?;
        let files = self.scanner.scan(&config.watched)?;
        resolve(&config, &files)
    }
}

/// Parse, validate and resolve `raw` in one call.
pub fn load(
    raw: Value,
    registry: &dyn PluginRegistry,
    scanner: &dyn SourceScanner,
) -> Result<BuildPlan> {
    Resolver::new(registry, scanner).load(raw)
}

/// Resolve a validated configuration against a list of candidate files.
///
/// Files outside the watched paths are skipped and duplicates keep their
/// first position. Every ownership conflict is reported in one
/// [`ConfigError::Invalid`].
pub fn resolve(config: &BuildConfig, files: &[String]) -> Result<BuildPlan> {
    let mut issues = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut assets = Vec::new();
    let mut unowned = Vec::new();
    let mut plugin_files: Vec<Vec<String>> = vec![Vec::new(); config.plugins.len()];

    let mut outputs = Vec::new();
    let mut slots: HashMap<(usize, String), usize> = HashMap::new();
    for (index, group) in config.groups.iter().enumerate() {
        for target in group.targets() {
            slots.insert((index, target.to_string()), outputs.len());
            outputs.push(OutputBinding {
                group: group.name.clone(),
                target: target.to_string(),
                path: config.public.join(target),
                sources: Vec::new(),
                plugins: Vec::new(),
            });
        }
    }

    for raw in files {
        let path = normalize(raw);
        if !config.is_watched(&path) || !seen.insert(path.clone()) {
            continue;
        }

        let conventions = &config.conventions;
        if conventions.ignored.is_match(&path) {
            tracing::trace!(file = %path, "ignored by convention");
            continue;
        }

        if conventions.assets.is_match(&path) {
            let destination = config.public.join(conventions.assets.strip_match(&path));
            tracing::trace!(file = %path, destination = %destination.display(), "asset");
            assets.push(AssetCopy {
                source: path,
                destination,
            });
            continue;
        }

        for (index, plugin) in config.plugins.iter().enumerate() {
            if plugin.accepts(&path) {
                plugin_files[index].push(path.clone());
            }
        }

        let routes: Vec<(usize, &str)> = config
            .groups
            .iter()
            .enumerate()
            .filter_map(|(index, group)| group.route(&path).map(|target| (index, target)))
            .collect();

        if routes.is_empty() {
            unowned.push(path);
            continue;
        }

        let mut by_artifact: IndexMap<String, Vec<usize>> = IndexMap::new();
        for (index, target) in &routes {
            by_artifact.entry(artifact_type(target)).or_default().push(*index);
        }

        let mut ambiguous = false;
        for (artifact, owners) in by_artifact {
            if owners.len() > 1 {
                ambiguous = true;
                issues.push(ConfigError::AmbiguousOwnership {
                    file: path.clone(),
                    groups: owners
                        .iter()
                        .map(|&index| config.groups[index].name.clone())
                        .collect(),
                    artifact,
                });
            }
        }
        if ambiguous {
            continue;
        }

        for (index, target) in routes {
            tracing::trace!(file = %path, output = target, "routed");
            if let Some(&slot) = slots.get(&(index, target.to_string())) {
                outputs[slot].sources.push(path.clone());
            }
        }
    }

    ConfigError::from_issues(issues)?;

    let processed: Vec<HashSet<&str>> = plugin_files
        .iter()
        .map(|files| files.iter().map(String::as_str).collect())
        .collect();

    for (slot, output) in outputs.iter_mut().enumerate() {
        let group = config
            .groups
            .iter()
            .find(|g| g.name == output.group)
            .map(|g| &g.order);
        if let Some(order) = group {
            order.arrange(&mut output.sources, &config.conventions.vendor);
        }

        output.plugins = config
            .plugins
            .iter()
            .zip(&processed)
            .filter(|(_, files)| output.sources.iter().any(|s| files.contains(s.as_str())))
            .map(|(plugin, _)| plugin.name.clone())
            .collect();

        tracing::debug!(
            slot,
            output = %output.target,
            sources = output.sources.len(),
            "output resolved"
        );
    }

    let plugins = config
        .plugins
        .iter()
        .zip(plugin_files)
        .map(|(plugin, files)| PluginPlan {
            name: plugin.name.clone(),
            package: plugin.package.clone(),
            options: plugin.options.clone(),
            files,
        })
        .collect();

    Ok(BuildPlan {
        watched: config.watched.clone(),
        public: config.public.clone(),
        outputs,
        assets,
        plugins,
        unowned,
        modules: config.modules.clone(),
        npm_enabled: config.npm_enabled,
        optimize: config.optimize,
    })
}

/// `./js\\a.js` → `js/a.js`
fn normalize(path: &str) -> String {
    let path = path.replace('\\', "/");
    path.trim_start_matches("./").to_string()
}
