/// Parse a plugin configuration key given with `--plugin`.
///
/// Keys are used verbatim under `plugins` in the configuration, so they must
/// be plain identifiers: letters, digits, `_` or `$`, not starting with a
/// digit.
///
/// # Examples
///
/// Valid: babel, elmBrunch, sass_plugin
/// Invalid: 1babel, elm-brunch, ""
pub fn parse_plugin_name(s: &str) -> Result<String, String> {
    let Some(first) = s.chars().next() else {
        return Err("Plugin name cannot be empty".to_string());
    };

    if !first.is_alphabetic() && first != '_' && first != '$' {
        return Err(format!(
            "Plugin name must start with a letter, underscore, or dollar sign: '{}'",
            s
        ));
    }

    if let Some(bad) = s.chars().find(|c| !c.is_alphanumeric() && *c != '_' && *c != '$') {
        return Err(format!(
            "Plugin name can only contain letters, numbers, underscores, or dollar signs (found '{}'); \
             use the configuration key, e.g. elmBrunch for elm-brunch",
            bad
        ));
    }

    Ok(s.to_string())
}

/// Parse the `--debounce` window in milliseconds (at most one minute).
pub fn parse_debounce(s: &str) -> Result<u64, String> {
    let ms: u64 = s
        .trim()
        .parse()
        .map_err(|_| format!("Debounce must be a whole number of milliseconds: '{}'", s))?;

    if ms > 60_000 {
        return Err(format!("Debounce of {}ms is longer than one minute", ms));
    }

    Ok(ms)
}
