//! Starter configurations written by `joinery init`.
//!
//! Both formats describe the same layout: scripts and styles joined into one
//! bundle each, vendor code first, static files copied verbatim.

use crate::cli::ConfigFormat;

/// The starter configuration in the given format.
pub fn starter_config(format: ConfigFormat) -> &'static str {
    match format {
        ConfigFormat::Toml => STARTER_TOML,
        ConfigFormat::Json => STARTER_JSON,
    }
}

const STARTER_TOML: &str = r#"# Joinery build configuration

[files.javascripts]
joinTo = "js/app.js"

[files.javascripts.order]
before = ["/vendor/"]

[files.stylesheets]
joinTo = "css/app.css"

[files.stylesheets.order]
after = ["css/app.css"]

[conventions]
assets = "/^(static)/"

[paths]
watched = ["static", "css", "js", "vendor"]
public = "../priv/static"

[modules]
autoRequire = { "js/app.js" = ["js/app"] }
"#;

const STARTER_JSON: &str = r#"{
  "files": {
    "javascripts": {
      "joinTo": "js/app.js",
      "order": { "before": ["/vendor/"] }
    },
    "stylesheets": {
      "joinTo": "css/app.css",
      "order": { "after": ["css/app.css"] }
    }
  },
  "conventions": {
    "assets": "/^(static)/"
  },
  "paths": {
    "watched": ["static", "css", "js", "vendor"],
    "public": "../priv/static"
  },
  "modules": {
    "autoRequire": { "js/app.js": ["js/app"] }
  }
}
"#;
