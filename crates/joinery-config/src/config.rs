//! Top-level configuration file structure and environment overrides.
//!
//! This module provides [`ConfigFile`], the serde view of a whole
//! configuration, and the merge logic behind `overrides.<env>`.
//! For file discovery, see the `discovery` module.

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ConfigError, Result as ConfigResult};
use crate::schema::{ConventionsConfig, FileGroupConfig, ModulesConfig, NpmConfig, PathsConfig};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub files: IndexMap<String, FileGroupConfig>,

    #[serde(default)]
    pub conventions: ConventionsConfig,

    #[serde(default)]
    pub paths: PathsConfig,

    /// Plugin name → options record. Declaration order is execution order.
    #[serde(default)]
    pub plugins: IndexMap<String, Value>,

    #[serde(default)]
    pub modules: ModulesConfig,

    #[serde(default)]
    pub npm: NpmConfig,

    #[serde(default)]
    pub optimize: bool,

    /// Environment name → partial configuration merged over the base
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub overrides: IndexMap<String, Value>,

    /// Sections that failed to parse; validation reports them.
    #[serde(skip)]
    pub(crate) rejected: Vec<RejectedField>,
}

/// A key or section that could not be read, with the serde message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RejectedField {
    pub field: String,
    pub hint: String,
}

impl RejectedField {
    pub(crate) fn to_error(&self) -> ConfigError {
        ConfigError::InvalidValue {
            field: self.field.clone(),
            hint: Some(self.hint.clone()),
        }
    }
}

impl ConfigFile {
    /// Create from serde_json::Value (for programmatic config)
    ///
    /// Sections, file groups and plugins are read one at a time. A part that
    /// does not parse (an unknown key, a value of the wrong type) keeps its
    /// default and is reported by validation under its own field path,
    /// together with every other problem.
    ///
    /// # Errors
    ///
    /// Fails only when `value` is not an object.
    ///
    /// # Example
    ///
    /// ```
    /// use joinery_config::{ConfigFile, JoinTo};
    /// use serde_json::json;
    ///
    /// let value = json!({
    ///     "files": { "javascripts": { "joinTo": "js/app.js" } },
    ///     "paths": { "watched": ["js"], "public": "../priv/static" }
    /// });
    ///
    /// let config = ConfigFile::from_value(value).unwrap();
    /// assert_eq!(
    ///     config.files["javascripts"].join_to,
    ///     Some(JoinTo::Single("js/app.js".into()))
    /// );
    /// ```
    pub fn from_value(value: Value) -> ConfigResult<Self> {
        let Value::Object(sections) = value else {
            return Err(ConfigError::InvalidValue {
                field: "config".to_string(),
                hint: Some("the configuration must be an object".to_string()),
            });
        };

        let mut config = ConfigFile::default();
        let mut rejected = Vec::new();

        for (key, raw) in sections {
            match key.as_str() {
                "files" => config.files = entries(&key, raw, &mut rejected),
                "conventions" => {
                    config.conventions = section(&key, raw, &mut rejected).unwrap_or_default()
                }
                "paths" => config.paths = section(&key, raw, &mut rejected).unwrap_or_default(),
                "plugins" => config.plugins = entries(&key, raw, &mut rejected),
                "modules" => config.modules = section(&key, raw, &mut rejected).unwrap_or_default(),
                "npm" => config.npm = section(&key, raw, &mut rejected).unwrap_or_default(),
                "optimize" => config.optimize = section(&key, raw, &mut rejected).unwrap_or_default(),
                "overrides" => config.overrides = entries(&key, raw, &mut rejected),
                other => rejected.push(RejectedField {
                    field: other.to_string(),
                    hint: "unknown configuration key".to_string(),
                }),
            }
        }

        if !rejected.is_empty() {
            tracing::debug!(count = rejected.len(), "configuration has unreadable fields");
        }
        config.rejected = rejected;
        Ok(config)
    }

    /// Like [`ConfigFile::from_value`], with `overrides.<env>` applied first.
    pub fn from_value_for_env(value: Value, env: Option<&str>) -> ConfigResult<Self> {
        Self::from_value(materialize_override(value, env)?)
    }

    /// Convert to serde_json::Value
    pub fn to_value(&self) -> ConfigResult<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Problems found while reading the raw value, one per field.
    pub fn read_errors(&self) -> Vec<ConfigError> {
        self.rejected.iter().map(RejectedField::to_error).collect()
    }
}

/// Deserialize one section, recording a failure under `field`.
fn section<T: DeserializeOwned>(
    field: &str,
    raw: Value,
    rejected: &mut Vec<RejectedField>,
) -> Option<T> {
    match serde_json::from_value(raw) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            rejected.push(RejectedField {
                field: field.to_string(),
                hint: e.to_string(),
            });
            None
        }
    }
}

/// Read a keyed table entry by entry so one bad entry spares the rest.
fn entries<T: DeserializeOwned>(
    name: &str,
    raw: Value,
    rejected: &mut Vec<RejectedField>,
) -> IndexMap<String, T> {
    let table: Map<String, Value> = match raw {
        Value::Object(table) => table,
        other => {
            rejected.push(RejectedField {
                field: name.to_string(),
                hint: format!("expected a table, found {}", kind_of(&other)),
            });
            return IndexMap::new();
        }
    };

    table
        .into_iter()
        .filter_map(|(key, value)| {
            let parsed = section(&format!("{name}.{key}"), value, rejected)?;
            Some((key, parsed))
        })
        .collect()
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a table",
    }
}

/// Merge `overrides.<env>` over the rest of a raw configuration value.
///
/// Objects merge key by key; arrays and scalars are replaced wholesale. An
/// environment without an override entry leaves the value unchanged.
pub fn materialize_override(mut value: Value, env: Option<&str>) -> ConfigResult<Value> {
    let Some(env) = env else {
        return Ok(value);
    };

    let patch = match value.get("overrides").and_then(|o| o.get(env)) {
        Some(patch) => patch.clone(),
        None => {
            tracing::debug!(env, "no override declared for environment");
            return Ok(value);
        }
    };

    let Value::Object(mut patch) = patch else {
        return Err(ConfigError::InvalidOverride {
            env: env.to_string(),
            message: "override must be an object".to_string(),
        });
    };

    if patch.remove("overrides").is_some() {
        return Err(ConfigError::InvalidOverride {
            env: env.to_string(),
            message: "overrides cannot be nested".to_string(),
        });
    }

    tracing::debug!(env, keys = patch.len(), "applying environment override");
    merge_values(&mut value, &Value::Object(patch));
    Ok(value)
}

pub(crate) fn merge_values(target: &mut Value, update: &Value) {
    match (target, update) {
        (Value::Object(target_map), Value::Object(update_map)) => {
            for (key, value) in update_map {
                merge_values(target_map.entry(key.clone()).or_insert(Value::Null), value);
            }
        }
        (target_slot, _) => {
            *target_slot = update.clone();
        }
    }
}
