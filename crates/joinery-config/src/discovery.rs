//! File-based config discovery for CLI use
//!
//! Handles finding configuration files and layering them with environment
//! variables before they are parsed into a [`ConfigFile`].

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use figment::providers::Env;
use figment::Figment;
use serde_json::Value;

use crate::config::{materialize_override, merge_values, ConfigFile};
use crate::error::{ConfigError, Result};

/// Config file names, in lookup order.
const CONFIG_FILES: &[&str] = &["joinery.toml", "joinery.json"];

/// Field holding the configuration inside `package.json`.
const MANIFEST_FIELD: &str = "joinery";

/// Prefix of environment variables layered over file values.
const ENV_PREFIX: &str = "JOINERY_";

/// File-based configuration discovery
///
/// Searches for configuration files in conventional locations and loads them.
/// Library users can call [`ConfigFile::from_value`] directly instead.
///
/// # Example
///
/// ```no_run
/// use joinery_config::ConfigDiscovery;
///
/// let discovery = ConfigDiscovery::new(".");
/// let config = discovery.load_for_env(Some("production")).unwrap();
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
    env_layer: bool,
}

impl ConfigDiscovery {
    /// Create a new config discovery with a root directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            env_layer: true,
        }
    }

    /// Do not layer `JOINERY_*` environment variables over file values.
    pub fn without_env(mut self) -> Self {
        self.env_layer = false;
        self
    }

    /// Find a config file in the root directory
    ///
    /// Searches in this order:
    /// 1. joinery.toml
    /// 2. joinery.json
    /// 3. package.json (joinery field)
    pub fn find(&self) -> Option<PathBuf> {
        for name in CONFIG_FILES {
            let path = self.root.join(name);
            if path.is_file() {
                return Some(path);
            }
        }

        let pkg_path = self.root.join("package.json");
        let content = fs::read_to_string(&pkg_path).ok()?;
        let parsed: Value = serde_json::from_str(&content).ok()?;
        match parsed.get(MANIFEST_FIELD) {
            Some(field) if !field.is_null() => Some(pkg_path),
            _ => None,
        }
    }

    /// Load config from the discovered file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if no config file is found.
    pub fn load(&self) -> Result<ConfigFile> {
        self.load_for_env(None)
    }

    /// Load config with `overrides.<env>` applied
    pub fn load_for_env(&self, env: Option<&str>) -> Result<ConfigFile> {
        let path = self.find().ok_or(ConfigError::NotFound)?;
        self.load_from(&path, env)
    }

    /// Load config from a specific file path
    ///
    /// Layers, lowest first: the file, its `overrides.<env>` entry, then
    /// `JOINERY_*` environment variables.
    pub fn load_from(&self, path: &Path, env: Option<&str>) -> Result<ConfigFile> {
        let mut value = materialize_override(self.read_value(path)?, env)?;
        if self.env_layer {
            merge_env_layer(&mut value)?;
        }
        ConfigFile::from_value(value)
    }

    /// Read a config file into a raw value.
    ///
    /// Files are parsed directly so that key order survives; figment only
    /// supplies the `JOINERY_*` layer, merged on top by [`Self::load_from`].
    pub fn read_value(&self, path: &Path) -> Result<Value> {
        if !path.is_file() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let invalid = |e: &dyn std::fmt::Display| ConfigError::InvalidValue {
            field: path.display().to_string(),
            hint: Some(e.to_string()),
        };

        let value = if path.file_name() == Some(OsStr::new("package.json")) {
            let mut manifest: Value = serde_json::from_str(&content).map_err(|e| invalid(&e))?;
            match manifest.get_mut(MANIFEST_FIELD).map(Value::take) {
                Some(field @ Value::Object(_)) => field,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: MANIFEST_FIELD.to_string(),
                        hint: Some(format!(
                            "Add a '{MANIFEST_FIELD}' object to your package.json"
                        )),
                    });
                }
            }
        } else {
            match path.extension().and_then(OsStr::to_str) {
                Some("toml") => toml::from_str(&content).map_err(|e| invalid(&e))?,
                Some("json") => serde_json::from_str(&content).map_err(|e| invalid(&e))?,
                other => {
                    return Err(ConfigError::UnsupportedFormat(
                        other.unwrap_or("<none>").to_string(),
                    ));
                }
            }
        };

        tracing::debug!(path = %path.display(), "read configuration");
        Ok(value)
    }
}

/// Merge the `JOINERY_*` environment variables over `value`.
fn merge_env_layer(value: &mut Value) -> Result<()> {
    let layer: Value = Figment::from(Env::prefixed(ENV_PREFIX).ignore(&["env"]).split("__"))
        .extract()
        .map_err(|e| ConfigError::InvalidValue {
            field: format!("{ENV_PREFIX}*"),
            hint: Some(e.to_string()),
        })?;

    if layer.as_object().is_some_and(|m| !m.is_empty()) {
        tracing::debug!(layer = %layer, "applying environment variables");
        merge_values(value, &layer);
    }
    Ok(())
}
