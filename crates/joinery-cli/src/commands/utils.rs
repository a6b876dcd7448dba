//! Shared utilities for command implementations.
//!
//! Every command except `init` starts the same way: find the project root,
//! load the configuration for the selected environment, and build the
//! registry of installed plugins.

use crate::cli::ProjectArgs;
use crate::error::{CliError, ConfigError, Result};
use joinery_config::{ConfigDiscovery, ConfigFile, InstalledPlugins, PluginDescriptor};
use std::path::{Path, PathBuf};

/// A loaded project, ready for validation or resolution.
#[derive(Debug)]
pub struct Project {
    pub root: PathBuf,
    pub config_path: PathBuf,
    pub env: Option<String>,
    pub file: ConfigFile,
    pub registry: InstalledPlugins,
}

impl Project {
    /// Load the project described by the shared command-line options.
    pub fn load(args: &ProjectArgs) -> Result<Self> {
        let root = project_root(args.cwd.as_deref())?;
        let discovery = ConfigDiscovery::new(&root);

        let config_path = match &args.config {
            Some(path) => resolve_path(path, &root),
            None => discovery.find().ok_or(ConfigError::NotFound)?,
        };
        let env = args.env.clone().filter(|e| !e.trim().is_empty());

        tracing::debug!(
            config = %config_path.display(),
            env = env.as_deref().unwrap_or("<none>"),
            "loading project"
        );
        let file = discovery.load_from(&config_path, env.as_deref())?;
        let registry = plugin_registry(&root, &args.plugins)?;

        Ok(Self {
            root,
            config_path,
            env,
            file,
            registry,
        })
    }

    /// Re-read the configuration file, keeping root, env and registry.
    pub fn reload(&mut self) -> Result<()> {
        self.file = ConfigDiscovery::new(&self.root).load_from(&self.config_path, self.env.as_deref())?;
        Ok(())
    }
}

/// Resolve a path relative to a working directory.
pub fn resolve_path(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// The project root: `--cwd` if given, else the current directory.
pub fn project_root(cwd: Option<&Path>) -> Result<PathBuf> {
    let current = std::env::current_dir()?;
    let root = match cwd {
        Some(dir) => resolve_path(dir, &current),
        None => current,
    };

    if !root.is_dir() {
        return Err(CliError::FileNotFound(root));
    }
    Ok(root)
}

/// Plugins installed according to `package.json`, plus any named on the
/// command line.
pub fn plugin_registry(root: &Path, extra: &[String]) -> Result<InstalledPlugins> {
    let manifest = root.join("package.json");
    let mut registry = if manifest.is_file() {
        InstalledPlugins::from_manifest_file(&manifest)?
    } else {
        tracing::debug!(root = %root.display(), "no package.json, starting with no plugins");
        InstalledPlugins::new()
    };

    for name in extra {
        registry.register(PluginDescriptor::new(name.as_str()));
    }
    Ok(registry)
}
