//! Pluggable config validation strategies
//!
//! Separates schema validation (pure, for library use) from filesystem
//! validation (for CLI use). Validation never stops at the first problem:
//! every issue is collected into one [`ConfigError::Invalid`].

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::config::ConfigFile;
use crate::error::{ConfigError, Result};
use crate::model::{BuildConfig, Conventions, FileGroup, JoinTarget, ModuleSettings, OrderRules};
use crate::pattern::Pattern;
use crate::plugin::{compile, PluginBinding, PluginRegistry};
use crate::schema::helpers::default_sources;
use crate::schema::{FileGroupConfig, JoinTo};

/// Characters that make a watched path a glob rather than a plain path.
const GLOB_METACHARACTERS: &[char] = &['*', '?', '[', ']', '{', '}', '!'];

/// Trait for pluggable config validation strategies
pub trait ConfigValidator {
    /// Validate a configuration file, producing the typed build configuration
    fn validate(&self, config: &ConfigFile) -> Result<BuildConfig>;
}

/// Schema-only validation (no filesystem checks)
///
/// # Example
///
/// ```
/// use joinery_config::{ConfigFile, ConfigValidator, InstalledPlugins, SchemaValidator};
/// use serde_json::json;
///
/// let config = ConfigFile::from_value(json!({
///     "files": { "javascripts": { "joinTo": "js/app.js" } },
///     "plugins": { "babel": { "ignore": ["/vendor/"] } }
/// }))
/// .unwrap();
///
/// let registry = InstalledPlugins::new().with("babel");
/// let build = SchemaValidator::new(&registry).validate(&config).unwrap();
/// assert_eq!(build.groups.len(), 1);
/// assert_eq!(build.plugins[0].name, "babel");
/// ```
pub struct SchemaValidator<'a> {
    registry: &'a dyn PluginRegistry,
}

impl<'a> SchemaValidator<'a> {
    pub fn new(registry: &'a dyn PluginRegistry) -> Self {
        Self { registry }
    }
}

impl ConfigValidator for SchemaValidator<'_> {
    fn validate(&self, config: &ConfigFile) -> Result<BuildConfig> {
        let mut issues = config.read_errors();

        let groups: Vec<FileGroup> = config
            .files
            .iter()
            .filter_map(|(name, group)| validate_group(name, group, &mut issues))
            .collect();

        let conventions = validate_conventions(config, &mut issues);
        let watched = validate_watched(&config.paths.watched, &mut issues);

        if config.paths.public.trim().is_empty() {
            issues.push(ConfigError::MissingField {
                field: "paths.public".to_string(),
                hint: "Set the directory bundles and assets are written to".to_string(),
            });
        }

        let mut plugins = Vec::with_capacity(config.plugins.len());
        for (name, raw) in &config.plugins {
            let Some(descriptor) = self.registry.lookup(name) else {
                issues.push(ConfigError::UnknownPlugin {
                    name: name.clone(),
                    installed: self.registry.names(),
                });
                continue;
            };
            if let Some(binding) = PluginBinding::build(descriptor, raw, &mut issues) {
                plugins.push(binding);
            }
        }

        validate_auto_require(config, &mut issues);

        let conventions = match conventions {
            Some(conventions) if issues.is_empty() => conventions,
            _ => return Err(ConfigError::Invalid(issues)),
        };

        tracing::debug!(
            groups = groups.len(),
            plugins = plugins.len(),
            watched = watched.len(),
            "configuration validated"
        );

        Ok(BuildConfig {
            groups,
            conventions,
            watched,
            public: PathBuf::from(&config.paths.public),
            plugins,
            modules: ModuleSettings {
                wrapper: config.modules.wrapper,
                definition: config.modules.definition,
                auto_require: config.modules.auto_require.clone(),
            },
            npm_enabled: config.npm.enabled,
            optimize: config.optimize,
        })
    }
}

fn validate_group(
    name: &str,
    group: &FileGroupConfig,
    issues: &mut Vec<ConfigError>,
) -> Option<FileGroup> {
    let before = issues.len();
    let field = format!("files.{name}");

    let target = match &group.join_to {
        None => {
            issues.push(missing_join_to(&field));
            None
        }
        Some(JoinTo::Single(target)) => {
            if target.trim().is_empty() {
                issues.push(missing_join_to(&field));
            } else {
                check_output_path(&format!("{field}.joinTo"), target, issues);
            }
            Some(JoinTarget::Single(target.clone()))
        }
        Some(JoinTo::Mapping(routes)) if routes.is_empty() => {
            issues.push(missing_join_to(&field));
            None
        }
        Some(JoinTo::Mapping(routes)) => {
            let mut compiled = Vec::with_capacity(routes.len());
            for (pattern, target) in routes {
                let route_field = format!("{field}.joinTo.{pattern}");
                if target.trim().is_empty() {
                    issues.push(ConfigError::MissingField {
                        field: route_field.clone(),
                        hint: "Map the pattern to an output path".to_string(),
                    });
                } else {
                    check_output_path(&route_field, target, issues);
                }
                if let Some(pattern) = compile(&route_field, pattern, issues) {
                    compiled.push((pattern, target.clone()));
                }
            }
            Some(JoinTarget::Routed(compiled))
        }
    };

    let sources = match &group.sources {
        Some(sources) if sources.is_empty() => {
            issues.push(ConfigError::MissingField {
                field: format!("{field}.sources"),
                hint: "List at least one source pattern".to_string(),
            });
            Vec::new()
        }
        Some(sources) => compile_all(&format!("{field}.sources"), sources, issues),
        None => match default_sources(name) {
            Some(default) => compile_all(&format!("{field}.sources"), &[default], issues),
            None => {
                issues.push(ConfigError::MissingField {
                    field: format!("{field}.sources"),
                    hint: format!(
                        "Group `{name}` has no default sources; list the patterns it owns"
                    ),
                });
                Vec::new()
            }
        },
    };

    let order = match &group.order {
        Some(order) => OrderRules {
            before: compile_all(&format!("{field}.order.before"), &order.before, issues),
            after: compile_all(&format!("{field}.order.after"), &order.after, issues),
        },
        None => OrderRules::default(),
    };

    if issues.len() > before {
        return None;
    }

    Some(FileGroup {
        name: name.to_string(),
        sources,
        target: target?,
        order,
    })
}

fn missing_join_to(field: &str) -> ConfigError {
    ConfigError::MissingField {
        field: format!("{field}.joinTo"),
        hint: "Set joinTo to the output path this group is concatenated into".to_string(),
    }
}

fn check_output_path(field: &str, target: &str, issues: &mut Vec<ConfigError>) {
    if target.starts_with('/') || Path::new(target).is_absolute() {
        issues.push(ConfigError::InvalidValue {
            field: field.to_string(),
            hint: Some(format!(
                "output `{target}` must be relative to the public directory"
            )),
        });
    }
}

fn compile_all<S: AsRef<str>>(
    field: &str,
    sources: &[S],
    issues: &mut Vec<ConfigError>,
) -> Vec<Pattern> {
    sources
        .iter()
        .filter_map(|source| compile(field, source.as_ref(), issues))
        .collect()
}

fn validate_conventions(config: &ConfigFile, issues: &mut Vec<ConfigError>) -> Option<Conventions> {
    let conventions = &config.conventions;
    let assets = compile("conventions.assets", &conventions.assets, issues);
    let ignored = compile("conventions.ignored", &conventions.ignored, issues);
    let vendor = compile("conventions.vendor", &conventions.vendor, issues);

    Some(Conventions {
        assets: assets?,
        ignored: ignored?,
        vendor: vendor?,
    })
}

/// Check watched paths and normalise them (`./app/` → `app`, `.` → root).
fn validate_watched(watched: &[String], issues: &mut Vec<ConfigError>) -> Vec<String> {
    if watched.is_empty() {
        issues.push(ConfigError::MissingField {
            field: "paths.watched".to_string(),
            hint: "List at least one directory to watch".to_string(),
        });
        return Vec::new();
    }

    let mut normalised = Vec::with_capacity(watched.len());
    for path in watched {
        let reason = if path.trim().is_empty() {
            Some("watched path cannot be empty")
        } else if path.starts_with('/') || Path::new(path).is_absolute() {
            Some("watched path must be relative to the project root")
        } else if path.contains(GLOB_METACHARACTERS) {
            Some("watched path must be a plain path, not a glob")
        } else {
            None
        };

        if let Some(reason) = reason {
            issues.push(ConfigError::InvalidPattern {
                field: "paths.watched".to_string(),
                pattern: path.clone(),
                reason: reason.to_string(),
            });
            continue;
        }

        let trimmed = path.trim_start_matches("./").trim_end_matches('/');
        let entry = if trimmed == "." { "" } else { trimmed };
        if !normalised.iter().any(|existing: &String| existing == entry) {
            normalised.push(entry.to_string());
        }
    }
    normalised
}

fn validate_auto_require(config: &ConfigFile, issues: &mut Vec<ConfigError>) {
    let mut targets: HashSet<&str> = HashSet::new();
    for group in config.files.values() {
        match &group.join_to {
            Some(JoinTo::Single(target)) => {
                targets.insert(target.as_str());
            }
            Some(JoinTo::Mapping(routes)) => {
                for target in routes.values() {
                    targets.insert(target.as_str());
                }
            }
            None => {}
        }
    }

    for (bundle, modules) in &config.modules.auto_require {
        let field = format!("modules.autoRequire.{bundle}");
        if !targets.contains(bundle.as_str()) {
            issues.push(ConfigError::InvalidValue {
                field: field.clone(),
                hint: Some(format!("no file group joins into `{bundle}`")),
            });
        }
        if modules.iter().any(|m| m.trim().is_empty()) {
            issues.push(ConfigError::InvalidValue {
                field,
                hint: Some("module names cannot be empty".to_string()),
            });
        }
    }
}

/// Filesystem validator (for CLI use)
///
/// Runs schema validation, then checks that every watched directory exists
/// under the project root.
///
/// # Example
///
/// ```no_run
/// use joinery_config::{ConfigFile, ConfigValidator, FsValidator, InstalledPlugins};
///
/// let registry = InstalledPlugins::new();
/// let validator = FsValidator::new(".", &registry);
/// validator.validate(&ConfigFile::default()).unwrap();
/// ```
pub struct FsValidator<'a> {
    root: PathBuf,
    schema: SchemaValidator<'a>,
}

impl<'a> FsValidator<'a> {
    /// Create a new filesystem validator with a root directory
    pub fn new(root: impl AsRef<Path>, registry: &'a dyn PluginRegistry) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            schema: SchemaValidator::new(registry),
        }
    }
}

impl ConfigValidator for FsValidator<'_> {
    fn validate(&self, config: &ConfigFile) -> Result<BuildConfig> {
        let build = self.schema.validate(config)?;

        let missing: Vec<ConfigError> = build
            .watched
            .iter()
            .map(|dir| self.root.join(dir))
            .filter(|path| !path.is_dir())
            .map(ConfigError::WatchedPathNotFound)
            .collect();

        ConfigError::from_issues(missing)?;
        Ok(build)
    }
}

/// Convenience function for schema-only validation
pub fn validate_schema(config: &ConfigFile, registry: &dyn PluginRegistry) -> Result<BuildConfig> {
    SchemaValidator::new(registry).validate(config)
}

/// Convenience function for filesystem validation
pub fn validate_fs(
    config: &ConfigFile,
    registry: &dyn PluginRegistry,
    root: impl AsRef<Path>,
) -> Result<BuildConfig> {
    FsValidator::new(root, registry).validate(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::InstalledPlugins;
    use serde_json::json;

    fn config(value: serde_json::Value) -> ConfigFile {
        ConfigFile::from_value(value).unwrap()
    }

    #[test]
    fn schema_validator_accepts_defaults() {
        let build = validate_schema(&ConfigFile::default(), &InstalledPlugins::new()).unwrap();
        assert!(build.groups.is_empty());
        assert_eq!(build.watched, vec!["app", "test", "vendor"]);
        assert_eq!(build.public, PathBuf::from("public"));
        assert!(build.npm_enabled);
    }

    #[test]
    fn schema_validator_rejects_missing_join_to() {
        let cfg = config(json!({ "files": { "javascripts": {} } }));
        let err = validate_schema(&cfg, &InstalledPlugins::new()).unwrap_err();
        assert!(err.issues().iter().any(|e| matches!(
            e,
            ConfigError::MissingField { field, .. } if field == "files.javascripts.joinTo"
        )));
    }

    #[test]
    fn schema_validator_rejects_blank_join_to_and_empty_mapping() {
        let cfg = config(json!({ "files": {
            "javascripts": { "joinTo": "  " },
            "stylesheets": { "joinTo": {} }
        } }));
        let err = validate_schema(&cfg, &InstalledPlugins::new()).unwrap_err();
        let missing = err
            .issues()
            .into_iter()
            .filter(|e| matches!(e, ConfigError::MissingField { .. }))
            .count();
        assert_eq!(missing, 2);
    }

    #[test]
    fn schema_validator_rejects_absolute_outputs() {
        let cfg = config(json!({ "files": { "javascripts": { "joinTo": "/js/app.js" } } }));
        let err = validate_schema(&cfg, &InstalledPlugins::new()).unwrap_err();
        assert!(matches!(err.issues()[..], [ConfigError::InvalidValue { .. }]));
    }

    #[test]
    fn custom_group_requires_sources() {
        let cfg = config(json!({ "files": { "fonts": { "joinTo": "fonts.css" } } }));
        let err = validate_schema(&cfg, &InstalledPlugins::new()).unwrap_err();
        assert!(matches!(
            err.issues()[..],
            [ConfigError::MissingField { field, .. }] if field == "files.fonts.sources"
        ));

        let cfg = config(json!({ "files": { "fonts": {
            "joinTo": "fonts.css",
            "sources": ["**/*.woff.css"]
        } } }));
        assert!(validate_schema(&cfg, &InstalledPlugins::new()).is_ok());
    }

    #[test]
    fn schema_validator_rejects_glob_watched_paths() {
        let cfg = config(json!({ "paths": { "watched": ["js", "src/**", "/abs", ""] } }));
        let err = validate_schema(&cfg, &InstalledPlugins::new()).unwrap_err();
        let patterns: Vec<_> = err
            .issues()
            .into_iter()
            .filter_map(|e| match e {
                ConfigError::InvalidPattern { field, pattern, .. } if field == "paths.watched" => {
                    Some(pattern.as_str())
                }
                _ => None,
            })
            .collect();
        assert_eq!(patterns, vec!["src/**", "/abs", ""]);
    }

    #[test]
    fn watched_paths_are_normalised() {
        let cfg = config(json!({ "paths": { "watched": ["./js/", "css", ".", "js"] } }));
        let build = validate_schema(&cfg, &InstalledPlugins::new()).unwrap();
        assert_eq!(build.watched, vec!["js", "css", ""]);
    }

    #[test]
    fn schema_validator_rejects_unknown_plugins() {
        let cfg = config(json!({ "plugins": { "babel": {}, "sass": {} } }));
        let registry = InstalledPlugins::new().with("babel");
        let err = validate_schema(&cfg, &registry).unwrap_err();
        match err.issues()[..] {
            [ConfigError::UnknownPlugin { name, installed }] => {
                assert_eq!(name, "sass");
                assert_eq!(installed, &vec!["babel".to_string()]);
            }
            ref other => panic!("expected one UnknownPlugin, got {other:?}"),
        }
    }

    #[test]
    fn schema_validator_rejects_invalid_asset_convention() {
        let cfg = config(json!({ "conventions": { "assets": "/^(static/" } }));
        let err = validate_schema(&cfg, &InstalledPlugins::new()).unwrap_err();
        assert!(matches!(
            err.issues()[..],
            [ConfigError::InvalidPattern { field, .. }] if field == "conventions.assets"
        ));
    }

    #[test]
    fn auto_require_must_target_a_join_output() {
        let cfg = config(json!({
            "files": { "javascripts": { "joinTo": "js/app.js" } },
            "modules": { "autoRequire": { "js/app.js": ["js/app"], "js/other.js": ["x"] } }
        }));
        let err = validate_schema(&cfg, &InstalledPlugins::new()).unwrap_err();
        assert!(matches!(
            err.issues()[..],
            [ConfigError::InvalidValue { field, .. }] if field == "modules.autoRequire.js/other.js"
        ));
    }

    #[test]
    fn all_problems_are_reported_together() {
        let cfg = config(json!({
            "files": { "javascripts": {}, "stylesheets": { "joinTo": "css/app.css" } },
            "conventions": { "assets": "[" },
            "paths": { "watched": ["*"], "public": "" },
            "plugins": { "coffee": {} }
        }));
        let err = validate_schema(&cfg, &InstalledPlugins::new()).unwrap_err();
        assert_eq!(err.issues().len(), 5);
    }
}
