//! Tests for default values and edge cases.

use joinery_config::{
    validate_schema, ConfigFile, ConventionsConfig, InstalledPlugins, ModuleStyle, ModulesConfig,
    NpmConfig, PathsConfig,
};
use serde_json::json;
use std::path::PathBuf;

#[test]
fn config_file_defaults() {
    let config = ConfigFile::default();
    assert!(config.files.is_empty());
    assert!(config.plugins.is_empty());
    assert!(config.overrides.is_empty());
    assert!(!config.optimize);
}

#[test]
fn conventions_defaults() {
    let conventions = ConventionsConfig::default();
    assert_eq!(conventions.assets, "/assets[/]/");
    assert_eq!(conventions.ignored, "/(^|/)_/");
    assert_eq!(conventions.vendor, "/(^bower_components|node_modules|vendor)[/]/");
}

#[test]
fn paths_defaults() {
    let paths = PathsConfig::default();
    assert_eq!(paths.watched, vec!["app", "test", "vendor"]);
    assert_eq!(paths.public, "public");
}

#[test]
fn modules_defaults() {
    let modules = ModulesConfig::default();
    assert_eq!(modules.wrapper, ModuleStyle::CommonJs);
    assert_eq!(modules.definition, ModuleStyle::CommonJs);
    assert!(modules.auto_require.is_empty());
}

#[test]
fn npm_enabled_by_default() {
    assert!(NpmConfig::default().enabled);
}

#[test]
fn empty_object_matches_default() {
    let config = ConfigFile::from_value(json!({})).unwrap();
    assert_eq!(config, ConfigFile::default());
}

#[test]
fn partial_sections_keep_remaining_defaults() {
    let config = ConfigFile::from_value(json!({
        "paths": { "public": "../priv/static" },
        "conventions": { "assets": "/^(static)/" }
    }))
    .unwrap();

    assert_eq!(config.paths.watched, vec!["app", "test", "vendor"]);
    assert_eq!(config.paths.public, "../priv/static");
    assert_eq!(config.conventions.assets, "/^(static)/");
    assert_eq!(config.conventions.ignored, "/(^|/)_/");
}

#[test]
fn module_style_accepts_false() {
    let config = ConfigFile::from_value(json!({
        "modules": { "wrapper": false, "definition": "amd" }
    }))
    .unwrap();
    assert_eq!(config.modules.wrapper, ModuleStyle::Disabled);
    assert_eq!(config.modules.definition, ModuleStyle::Amd);
}

#[test]
fn default_config_validates_to_empty_plan_inputs() {
    let build = validate_schema(&ConfigFile::default(), &InstalledPlugins::new()).unwrap();
    assert!(build.groups.is_empty());
    assert!(build.plugins.is_empty());
    assert_eq!(build.public, PathBuf::from("public"));
    assert!(build.conventions.vendor.is_match("vendor/jquery.js"));
    assert!(build.conventions.vendor.is_match("node_modules/react/index.js"));
    assert!(build.conventions.ignored.is_match("app/styles/_mixins.scss"));
    assert!(build.conventions.assets.is_match("app/assets/logo.png"));
}

#[test]
fn well_known_groups_get_default_sources() {
    let config = ConfigFile::from_value(json!({
        "files": {
            "javascripts": { "joinTo": "js/app.js" },
            "stylesheets": { "joinTo": "css/app.css" },
            "templates": { "joinTo": "js/templates.js" }
        }
    }))
    .unwrap();

    let build = validate_schema(&config, &InstalledPlugins::new()).unwrap();
    let owner = |file: &str| -> Vec<&str> {
        build
            .groups
            .iter()
            .filter(|g| g.route(file).is_some())
            .map(|g| g.name.as_str())
            .collect()
    };

    assert_eq!(owner("app/main.js"), vec!["javascripts"]);
    assert_eq!(owner("app/main.scss"), vec!["stylesheets"]);
    assert_eq!(owner("app/views/page.hbs"), vec!["templates"]);
    assert!(owner("app/logo.png").is_empty());
}
