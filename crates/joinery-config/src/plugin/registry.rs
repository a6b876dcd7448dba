//! Installed-plugin registry.
//!
//! The registry answers one question for the validator: is a plugin with this
//! configuration key installed, and what does it process?

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::error::{ConfigError, Result};

/// Package name suffixes that mark a dependency as a build plugin.
const PLUGIN_SUFFIXES: &[&str] = &["-brunch", "-plugin"];

/// Known plugin stems, their option schema and the extensions they handle.
const KNOWN_PLUGINS: &[(&str, PluginSchema, &[&str])] = &[
    ("babel", PluginSchema::Babel, &["js", "jsx", "mjs", "es6"]),
    ("elm", PluginSchema::Elm, &["elm"]),
    ("sass", PluginSchema::Generic, &["scss", "sass"]),
    ("less", PluginSchema::Generic, &["less"]),
    ("postcss", PluginSchema::Generic, &["css"]),
    ("handlebars", PluginSchema::Generic, &["hbs", "handlebars"]),
];

/// Option schema a plugin's configuration is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PluginSchema {
    Babel,
    Elm,
    /// No built-in schema; options are passed through untouched
    Generic,
}

/// What the registry knows about one installed plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginDescriptor {
    /// Key used under `plugins` in the configuration
    pub name: String,
    /// npm package providing the plugin, when discovered from a manifest
    pub package: Option<String>,
    pub schema: PluginSchema,
    /// File extensions the plugin processes; empty means every file
    pub extensions: Vec<String>,
}

impl PluginDescriptor {
    /// Describe a plugin by configuration key, filling schema and extensions
    /// from the known-plugin table.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let (schema, extensions) = match known(&name) {
            Some((_, schema, extensions)) => {
                (*schema, extensions.iter().map(|e| e.to_string()).collect())
            }
            None => (PluginSchema::Generic, Vec::new()),
        };

        Self {
            name,
            package: None,
            schema,
            extensions,
        }
    }

    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }
}

fn known(name: &str) -> Option<&'static (&'static str, PluginSchema, &'static [&'static str])> {
    let stem = name
        .strip_suffix("Brunch")
        .or_else(|| name.strip_suffix("Plugin"))
        .unwrap_or(name);
    KNOWN_PLUGINS.iter().find(|(known, _, _)| *known == stem)
}

/// Source of installed plugins consulted during validation.
pub trait PluginRegistry {
    fn lookup(&self, name: &str) -> Option<&PluginDescriptor>;

    /// Every configuration key the registry recognises.
    fn names(&self) -> Vec<String>;
}

/// In-memory plugin registry.
///
/// # Example
///
/// ```
/// use joinery_config::{InstalledPlugins, PluginRegistry, PluginSchema};
///
/// let plugins = InstalledPlugins::new().with("babel").with("elmBrunch");
/// assert_eq!(plugins.lookup("elmBrunch").unwrap().schema, PluginSchema::Elm);
/// assert!(plugins.lookup("sass").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InstalledPlugins {
    plugins: IndexMap<String, PluginDescriptor>,
}

impl InstalledPlugins {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin by configuration key.
    pub fn with(mut self, name: impl Into<String>) -> Self {
        self.register(PluginDescriptor::new(name));
        self
    }

    pub fn register(&mut self, descriptor: PluginDescriptor) {
        self.plugins.insert(descriptor.name.clone(), descriptor);
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Build a registry from the dependencies of a parsed `package.json`.
    ///
    /// Every dependency whose name ends in a plugin suffix is registered
    /// under its camelCased package name and under its bare stem, so
    /// `babel-brunch` answers to both `babelBrunch` and `babel`.
    pub fn from_manifest(manifest: &Value) -> Self {
        let mut registry = Self::new();

        for section in ["dependencies", "devDependencies"] {
            let Some(deps) = manifest.get(section).and_then(Value::as_object) else {
                continue;
            };

            for package in deps.keys() {
                let Some(stem) = PLUGIN_SUFFIXES
                    .iter()
                    .find_map(|suffix| package.strip_suffix(suffix))
                else {
                    continue;
                };

                for key in [camel_case(package), camel_case(stem)] {
                    if !registry.plugins.contains_key(&key) {
                        let descriptor = PluginDescriptor::new(key).with_package(package.clone());
                        registry.register(descriptor);
                    }
                }
            }
        }

        tracing::debug!(plugins = registry.len(), "plugins discovered from manifest");
        registry
    }

    /// Read `package.json` from disk and build a registry from it.
    pub fn from_manifest_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let manifest: Value =
            serde_json::from_str(&content).map_err(|e| ConfigError::InvalidValue {
                field: path.display().to_string(),
                hint: Some(format!("Invalid JSON: {}", e)),
            })?;
        Ok(Self::from_manifest(&manifest))
    }
}

impl PluginRegistry for InstalledPlugins {
    fn lookup(&self, name: &str) -> Option<&PluginDescriptor> {
        self.plugins.get(name)
    }

    fn names(&self) -> Vec<String> {
        self.plugins.keys().cloned().collect()
    }
}

/// `elm-brunch` → `elmBrunch`, `@scope/my-plugin` → `myPlugin`.
fn camel_case(package: &str) -> String {
    let base = package.rsplit('/').next().unwrap_or(package);
    let mut out = String::with_capacity(base.len());
    let mut upper = false;
    for c in base.chars() {
        if c == '-' || c == '_' || c == '.' {
            upper = !out.is_empty();
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn descriptor_fills_known_plugin_details() {
        let babel = PluginDescriptor::new("babel");
        assert_eq!(babel.schema, PluginSchema::Babel);
        assert!(babel.extensions.contains(&"jsx".to_string()));

        let elm = PluginDescriptor::new("elmBrunch");
        assert_eq!(elm.schema, PluginSchema::Elm);
        assert_eq!(elm.extensions, vec!["elm"]);

        let custom = PluginDescriptor::new("svgSprite");
        assert_eq!(custom.schema, PluginSchema::Generic);
        assert!(custom.extensions.is_empty());
    }

    #[test]
    fn camel_case_converts_package_names() {
        assert_eq!(camel_case("elm-brunch"), "elmBrunch");
        assert_eq!(camel_case("babel"), "babel");
        assert_eq!(camel_case("@acme/svg-sprite-plugin"), "svgSpritePlugin");
    }

    #[test]
    fn manifest_registers_both_keys() {
        let manifest = json!({
            "dependencies": { "phoenix": "file:../deps/phoenix" },
            "devDependencies": {
                "babel-brunch": "6.1.1",
                "elm-brunch": "^0.10.0",
                "brunch": "2.10.9"
            }
        });

        let registry = InstalledPlugins::from_manifest(&manifest);
        assert_eq!(registry.len(), 4);

        let babel = registry.lookup("babel").unwrap();
        assert_eq!(babel.package.as_deref(), Some("babel-brunch"));
        assert_eq!(babel.schema, PluginSchema::Babel);

        assert!(registry.lookup("babelBrunch").is_some());
        assert_eq!(registry.lookup("elmBrunch").unwrap().schema, PluginSchema::Elm);
        assert!(registry.lookup("phoenix").is_none());
        assert!(registry.lookup("brunch").is_none());
    }

    #[test]
    fn manifest_without_dependencies_is_empty() {
        let registry = InstalledPlugins::from_manifest(&json!({ "name": "app" }));
        assert!(registry.is_empty());
    }
}
