//! Tests for configuration validation.

use joinery_config::{
    validate_fs, validate_schema, ConfigError, ConfigFile, ConfigValidator, FsValidator,
    InstalledPlugins, PluginOptions, PluginRegistry, PluginSchema,
};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

fn config(value: serde_json::Value) -> ConfigFile {
    ConfigFile::from_value(value).expect("config parses")
}

#[test]
fn fs_validator_catches_missing_watched_path() {
    let dir = TempDir::new().expect("tempdir");
    fs::create_dir(dir.path().join("js")).expect("create js dir");

    let cfg = config(json!({ "paths": { "watched": ["js", "elm"] } }));
    let registry = InstalledPlugins::new();

    let err = FsValidator::new(dir.path(), &registry)
        .validate(&cfg)
        .unwrap_err();
    let issues = err.issues();
    assert_eq!(issues.len(), 1);
    match issues[0] {
        ConfigError::WatchedPathNotFound(path) => assert!(path.ends_with("elm")),
        other => panic!("expected WatchedPathNotFound, got {other:?}"),
    }
}

#[test]
fn fs_validator_succeeds_when_watched_paths_exist() {
    let dir = TempDir::new().expect("tempdir");
    for sub in ["static", "css", "js"] {
        fs::create_dir(dir.path().join(sub)).expect("create dir");
    }

    let cfg = config(json!({
        "files": { "javascripts": { "joinTo": "js/app.js" } },
        "paths": { "watched": ["static", "css", "./js/"] }
    }));

    let build = validate_fs(&cfg, &InstalledPlugins::new(), dir.path()).unwrap();
    assert_eq!(build.watched, vec!["static", "css", "js"]);
}

#[test]
fn fs_validator_reports_schema_problems_first() {
    let dir = TempDir::new().expect("tempdir");
    let cfg = config(json!({ "files": { "javascripts": {} } }));

    let err = validate_fs(&cfg, &InstalledPlugins::new(), dir.path()).unwrap_err();
    assert!(err
        .issues()
        .iter()
        .all(|e| matches!(e, ConfigError::MissingField { .. })));
}

#[test]
fn manifest_registry_resolves_suffixed_packages() {
    let manifest = json!({
        "dependencies": { "phoenix": "file:../deps/phoenix" },
        "devDependencies": {
            "babel-brunch": "6.0.5",
            "elm-brunch": "^0.8.0",
            "clean-css-brunch": "2.0.0"
        }
    });

    let registry = InstalledPlugins::from_manifest(&manifest);
    assert!(registry.lookup("babel").is_some());
    assert!(registry.lookup("babelBrunch").is_some());
    assert!(registry.lookup("cleanCss").is_some());
    assert!(registry.lookup("phoenix").is_none());

    let elm = registry.lookup("elmBrunch").unwrap();
    assert_eq!(elm.schema, PluginSchema::Elm);
    assert_eq!(elm.package.as_deref(), Some("elm-brunch"));
}

#[test]
fn manifest_registry_reads_package_json_from_disk() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("package.json");
    fs::write(&path, r#"{ "devDependencies": { "sass-brunch": "^2.10.4" } }"#).unwrap();

    let registry = InstalledPlugins::from_manifest_file(&path).unwrap();
    assert_eq!(registry.names(), vec!["sassBrunch", "sass"]);
}

#[test]
fn typed_elm_options_are_checked() {
    let registry = InstalledPlugins::new().with("elmBrunch");

    let err = validate_schema(
        &config(json!({ "plugins": { "elmBrunch": { "mainModule": ["Main.elm"] } } })),
        &registry,
    )
    .unwrap_err();
    assert!(err.to_string().contains("plugins.elmBrunch"));

    let build = validate_schema(
        &config(json!({ "plugins": { "elmBrunch": {
            "elmFolder": null,
            "mainModules": ["elm/Main.elm"],
            "outputFolder": "../js"
        } } })),
        &registry,
    );
    assert!(build.is_err(), "unknown elm option keys are rejected");

    let build = validate_schema(
        &config(json!({ "plugins": { "elmBrunch": {
            "mainModules": ["elm/Main.elm"],
            "outputFolder": "../js",
            "outputFile": "elm.js",
            "makeParameters": ["--debug"]
        } } })),
        &registry,
    )
    .unwrap();
    match &build.plugins[0].options {
        PluginOptions::Elm(elm) => {
            assert_eq!(elm.main_modules, vec!["elm/Main.elm"]);
            assert_eq!(elm.output_file.as_deref(), Some("elm.js"));
            assert_eq!(elm.make_parameters, vec!["--debug"]);
        }
        other => panic!("expected elm options, got {other:?}"),
    }
}

#[test]
fn generic_plugin_options_pass_through() {
    let registry = InstalledPlugins::new().with("uglify");
    let build = validate_schema(
        &config(json!({ "plugins": { "uglify": { "mangle": true, "ignore": "/vendor/" } } })),
        &registry,
    )
    .unwrap();

    let plugin = &build.plugins[0];
    assert!(plugin.is_ignored("vendor/jquery.js"));
    match &plugin.options {
        PluginOptions::Generic(map) => {
            assert_eq!(map.get("mangle"), Some(&json!(true)));
            assert!(!map.contains_key("ignore"));
        }
        other => panic!("expected generic options, got {other:?}"),
    }
}

#[test]
fn issues_cover_every_section() {
    let err = validate_schema(
        &config(json!({
            "files": { "javascripts": { "joinTo": "/abs/app.js" } },
            "conventions": { "ignored": "/(/" },
            "paths": { "watched": [], "public": " " },
            "plugins": { "coffee": {} },
            "modules": { "autoRequire": { "js/other.js": ["js/app"] } }
        })),
        &InstalledPlugins::new(),
    )
    .unwrap_err();

    let issues = err.issues();
    assert!(issues
        .iter()
        .any(|e| matches!(e, ConfigError::InvalidValue { field, .. } if field == "files.javascripts.joinTo")));
    assert!(issues
        .iter()
        .any(|e| matches!(e, ConfigError::InvalidPattern { field, .. } if field == "conventions.ignored")));
    assert!(issues
        .iter()
        .any(|e| matches!(e, ConfigError::MissingField { field, .. } if field == "paths.watched")));
    assert!(issues
        .iter()
        .any(|e| matches!(e, ConfigError::MissingField { field, .. } if field == "paths.public")));
    assert!(issues
        .iter()
        .any(|e| matches!(e, ConfigError::UnknownPlugin { name, .. } if name == "coffee")));
    assert!(issues
        .iter()
        .any(|e| matches!(e, ConfigError::InvalidValue { field, .. } if field == "modules.autoRequire.js/other.js")));
}
