// Helper defaults
pub(crate) fn default_true() -> bool {
    true
}

pub(crate) fn default_watched() -> Vec<String> {
    vec!["app".to_string(), "test".to_string(), "vendor".to_string()]
}

pub(crate) fn default_public() -> String {
    "public".to_string()
}

pub(crate) fn default_assets() -> String {
    "/assets[/]/".to_string()
}

pub(crate) fn default_ignored() -> String {
    "/(^|/)_/".to_string()
}

pub(crate) fn default_vendor() -> String {
    "/(^bower_components|node_modules|vendor)[/]/".to_string()
}

/// Source patterns for the well-known group names.
pub(crate) fn default_sources(group: &str) -> Option<&'static str> {
    match group {
        "javascripts" => Some("**/*.{js,mjs,cjs,jsx,ts,tsx}"),
        "stylesheets" => Some("**/*.{css,scss,sass,less,styl}"),
        "templates" => Some("**/*.{hbs,handlebars,pug,jade,eex,html}"),
        _ => None,
    }
}
