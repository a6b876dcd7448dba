//! Error types for configuration loading, validation and resolution.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    // Schema validation errors
    #[error("missing required field `{field}`: {hint}")]
    MissingField { field: String, hint: String },

    #[error("unknown plugin `{name}`{}", installed_hint(.installed))]
    UnknownPlugin { name: String, installed: Vec<String> },

    #[error("invalid pattern `{pattern}` in `{field}`: {reason}")]
    InvalidPattern {
        field: String,
        pattern: String,
        reason: String,
    },

    #[error(
        "`{file}` is claimed by file groups {} for the same `.{artifact}` artifact type",
        .groups.join(", ")
    )]
    AmbiguousOwnership {
        file: String,
        groups: Vec<String>,
        artifact: String,
    },

    #[error("invalid value for `{field}`{}", .hint.as_ref().map(|h| format!(": {h}")).unwrap_or_default())]
    InvalidValue { field: String, hint: Option<String> },

    #[error("invalid override `{env}`: {message}")]
    InvalidOverride { env: String, message: String },

    // Filesystem validation errors (for CLI use)
    #[error("watched path not found: {}", .0.display())]
    WatchedPathNotFound(PathBuf),

    // Config discovery errors
    #[error("config not found")]
    NotFound,

    #[error("config file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("unsupported configuration format: {0}")]
    UnsupportedFormat(String),

    /// Every problem found in one validation or resolution pass.
    #[error("configuration has {} problem(s):\n{}", .0.len(), render_issues(.0))]
    Invalid(Vec<ConfigError>),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    /// Flattened view of the individual problems behind this error.
    ///
    /// A collected [`ConfigError::Invalid`] yields its members; any other
    /// error yields itself.
    pub fn issues(&self) -> Vec<&ConfigError> {
        match self {
            ConfigError::Invalid(inner) => inner.iter().flat_map(|e| e.issues()).collect(),
            other => vec![other],
        }
    }

    /// Wrap collected problems, or return `Ok` when there are none.
    pub(crate) fn from_issues(issues: Vec<ConfigError>) -> Result<()> {
        if issues.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(issues))
        }
    }
}

fn installed_hint(installed: &[String]) -> String {
    if installed.is_empty() {
        " (no plugins are installed)".to_string()
    } else {
        format!(" (installed: {})", installed.join(", "))
    }
}

fn render_issues(issues: &[ConfigError]) -> String {
    issues
        .iter()
        .map(|e| format!("  - {e}"))
        .collect::<Vec<_>>()
        .join("\n")
}
