//! Plugin bindings and their strongly typed options.

mod registry;

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ConfigError;
use crate::pattern::Pattern;

pub use registry::{InstalledPlugins, PluginDescriptor, PluginRegistry, PluginSchema};

/// Options for the JavaScript transpiler plugin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BabelOptions {
    #[serde(default)]
    pub presets: Vec<String>,

    #[serde(default)]
    pub plugins: Vec<String>,

    /// Replaces the default extension filter when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

/// Options for the Elm compiler plugin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ElmOptions {
    /// Entry modules handed to the compiler
    #[serde(default)]
    pub main_modules: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_file: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_folder: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executable_path: Option<String>,

    #[serde(default)]
    pub make_parameters: Vec<String>,
}

/// Plugin options, discriminated by the plugin's schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "schema", content = "options", rename_all = "lowercase")]
pub enum PluginOptions {
    Babel(BabelOptions),
    Elm(ElmOptions),
    Generic(Map<String, Value>),
}

/// One validated `plugins` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct PluginBinding {
    pub name: String,
    pub package: Option<String>,
    pub options: PluginOptions,
    /// Files this plugin must not process
    pub ignore: Vec<Pattern>,
    extensions: Vec<String>,
    filter: Option<Pattern>,
}

impl PluginBinding {
    /// Validate a raw options record against the descriptor's schema.
    ///
    /// Problems are pushed onto `issues`; `None` is returned if any were found.
    pub(crate) fn build(
        descriptor: &PluginDescriptor,
        raw: &Value,
        issues: &mut Vec<ConfigError>,
    ) -> Option<Self> {
        let field = format!("plugins.{}", descriptor.name);
        let before = issues.len();

        let mut options = match raw {
            Value::Object(map) => map.clone(),
            Value::Null => Map::new(),
            _ => {
                issues.push(ConfigError::InvalidValue {
                    field,
                    hint: Some("plugin options must be an object".to_string()),
                });
                return None;
            }
        };

        let ignore_sources = match options.remove("ignore") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::String(single)) => vec![single],
            Some(Value::Array(items)) => items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    other => {
                        issues.push(ConfigError::InvalidValue {
                            field: format!("{field}.ignore"),
                            hint: Some(format!("expected a pattern string, found {other}")),
                        });
                        None
                    }
                })
                .collect(),
            Some(other) => {
                issues.push(ConfigError::InvalidValue {
                    field: format!("{field}.ignore"),
                    hint: Some(format!("expected a list of patterns, found {other}")),
                });
                Vec::new()
            }
        };

        let ignore: Vec<Pattern> = ignore_sources
            .iter()
            .filter_map(|source| compile(&format!("{field}.ignore"), source, issues))
            .collect();

        let mut filter = None;
        let options = match descriptor.schema {
            PluginSchema::Babel => {
                let babel: BabelOptions = typed(&field, options, issues)?;
                if let Some(pattern) = &babel.pattern {
                    filter = compile(&format!("{field}.pattern"), pattern, issues);
                }
                PluginOptions::Babel(babel)
            }
            PluginSchema::Elm => {
                let elm: ElmOptions = typed(&field, options, issues)?;
                if elm.main_modules.is_empty() {
                    issues.push(ConfigError::MissingField {
                        field: format!("{field}.mainModules"),
                        hint: "List the Elm entry modules to compile".to_string(),
                    });
                }
                if elm.output_file.as_deref().is_some_and(|f| f.trim().is_empty()) {
                    issues.push(ConfigError::InvalidValue {
                        field: format!("{field}.outputFile"),
                        hint: Some("output file name cannot be empty".to_string()),
                    });
                }
                PluginOptions::Elm(elm)
            }
            PluginSchema::Generic => PluginOptions::Generic(options),
        };

        if issues.len() > before {
            return None;
        }

        Some(Self {
            name: descriptor.name.clone(),
            package: descriptor.package.clone(),
            options,
            ignore,
            extensions: descriptor.extensions.clone(),
            filter,
        })
    }

    /// Whether the plugin would run on `path`, ignoring `ignore` patterns.
    pub fn handles(&self, path: &str) -> bool {
        if let Some(filter) = &self.filter {
            return filter.is_match(path);
        }
        if self.extensions.is_empty() {
            return true;
        }
        Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }

    pub fn is_ignored(&self, path: &str) -> bool {
        self.ignore.iter().any(|p| p.is_match(path))
    }

    /// Whether `path` enters this plugin's transform step.
    pub fn accepts(&self, path: &str) -> bool {
        self.handles(path) && !self.is_ignored(path)
    }
}

fn typed<T: serde::de::DeserializeOwned>(
    field: &str,
    options: Map<String, Value>,
    issues: &mut Vec<ConfigError>,
) -> Option<T> {
    match serde_json::from_value(Value::Object(options)) {
        Ok(typed) => Some(typed),
        Err(e) => {
            issues.push(ConfigError::InvalidValue {
                field: field.to_string(),
                hint: Some(e.to_string()),
            });
            None
        }
    }
}

/// Compile a pattern, recording an `InvalidPattern` issue on failure.
pub(crate) fn compile(field: &str, source: &str, issues: &mut Vec<ConfigError>) -> Option<Pattern> {
    match Pattern::parse(source) {
        Ok(pattern) => Some(pattern),
        Err(e) => {
            issues.push(ConfigError::InvalidPattern {
                field: field.to_string(),
                pattern: source.to_string(),
                reason: e.to_string(),
            });
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn build(name: &str, raw: Value) -> (Option<PluginBinding>, Vec<ConfigError>) {
        let mut issues = Vec::new();
        let binding = PluginBinding::build(&PluginDescriptor::new(name), &raw, &mut issues);
        (binding, issues)
    }

    #[test]
    fn babel_binding_parses_ignore_and_options() {
        let (binding, issues) = build(
            "babel",
            json!({ "ignore": ["/vendor/", "/elm.js$/"], "presets": ["env"] }),
        );
        assert!(issues.is_empty());
        let binding = binding.unwrap();

        assert_eq!(binding.ignore.len(), 2);
        assert!(binding.accepts("js/app.js"));
        assert!(!binding.accepts("vendor/jquery.js"));
        assert!(!binding.accepts("js/elm.js"));
        assert!(!binding.accepts("css/app.css"));

        let PluginOptions::Babel(options) = &binding.options else {
            panic!("expected babel options");
        };
        assert_eq!(options.presets, vec!["env"]);
    }

    #[test]
    fn babel_pattern_replaces_extension_filter() {
        let (binding, issues) = build("babel", json!({ "pattern": "/\\.(js|es7)$/" }));
        assert!(issues.is_empty());
        let binding = binding.unwrap();
        assert!(binding.handles("app/x.es7"));
        assert!(!binding.handles("app/x.jsx"));
    }

    #[test]
    fn elm_binding_requires_main_modules() {
        let (binding, issues) = build("elmBrunch", json!({ "outputFolder": "js" }));
        assert!(binding.is_none());
        assert!(matches!(
            &issues[..],
            [ConfigError::MissingField { field, .. }] if field == "plugins.elmBrunch.mainModules"
        ));
    }

    #[test]
    fn elm_binding_reads_camel_case_options() {
        let (binding, issues) = build(
            "elmBrunch",
            json!({
                "mainModules": ["elm/Main.elm"],
                "outputFile": "elm.js",
                "outputFolder": "js",
                "makeParameters": ["--debug"]
            }),
        );
        assert!(issues.is_empty());
        let binding = binding.unwrap();
        assert!(binding.handles("elm/Main.elm"));
        assert!(!binding.handles("js/app.js"));

        let PluginOptions::Elm(options) = binding.options else {
            panic!("expected elm options");
        };
        assert_eq!(options.output_file.as_deref(), Some("elm.js"));
        assert_eq!(options.make_parameters, vec!["--debug"]);
    }

    #[test]
    fn typed_options_reject_unknown_keys() {
        let (binding, issues) = build("babel", json!({ "presetz": ["env"] }));
        assert!(binding.is_none());
        assert!(matches!(&issues[..], [ConfigError::InvalidValue { .. }]));
    }

    #[test]
    fn generic_plugins_pass_options_through() {
        let (binding, issues) = build("svgSprite", json!({ "ignore": "/icons-old/", "size": 24 }));
        assert!(issues.is_empty());
        let binding = binding.unwrap();
        assert!(binding.handles("anything.svg"));
        assert!(binding.is_ignored("icons-old/a.svg"));

        let PluginOptions::Generic(map) = &binding.options else {
            panic!("expected generic options");
        };
        assert_eq!(map.get("size"), Some(&json!(24)));
        assert!(!map.contains_key("ignore"));
    }

    #[test]
    fn every_bad_ignore_pattern_is_reported() {
        let (binding, issues) = build("babel", json!({ "ignore": ["/(a/", "[b", 3] }));
        assert!(binding.is_none());
        assert_eq!(issues.len(), 3);
    }
}
