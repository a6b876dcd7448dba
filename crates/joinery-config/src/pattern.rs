//! Path-matching patterns used throughout the configuration.
//!
//! A pattern is written as a string. `/body/` (optionally `/body/i`) is a
//! regular expression searched anywhere in the path; every other string is a
//! glob matched against the whole path. Paths are always relative and use
//! forward slashes.

use std::fmt;

use globset::{GlobBuilder, GlobMatcher};
use regex::{Regex, RegexBuilder};
use serde::{Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("pattern is empty")]
    Empty,

    #[error("unsupported regex flag `{0}` (only `i` is allowed)")]
    UnsupportedFlag(char),

    #[error(transparent)]
    Regex(#[from] regex::Error),

    #[error(transparent)]
    Glob(#[from] globset::Error),
}

#[derive(Debug, Clone)]
enum Matcher {
    Regex(Regex),
    Glob(GlobMatcher),
}

/// A compiled path pattern that remembers its source text.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    matcher: Matcher,
}

impl Pattern {
    /// Compile a pattern from its configuration string.
    ///
    /// # Example
    ///
    /// ```
    /// use joinery_config::Pattern;
    ///
    /// let vendor = Pattern::parse("/vendor/").unwrap();
    /// assert!(vendor.is_match("js/vendor/jquery.js"));
    ///
    /// let scripts = Pattern::parse("**/*.js").unwrap();
    /// assert!(scripts.is_match("app.js"));
    /// assert!(!scripts.is_match("app.css"));
    /// ```
    pub fn parse(source: &str) -> Result<Self, PatternError> {
        if source.trim().is_empty() {
            return Err(PatternError::Empty);
        }

        let matcher = match regex_literal(source) {
            Some((body, flags)) => {
                if body.is_empty() {
                    return Err(PatternError::Empty);
                }
                let mut builder = RegexBuilder::new(body);
                for flag in flags.chars() {
                    match flag {
                        'i' => {
                            builder.case_insensitive(true);
                        }
                        other => return Err(PatternError::UnsupportedFlag(other)),
                    }
                }
                Matcher::Regex(builder.build()?)
            }
            None => Matcher::Glob(
                GlobBuilder::new(source)
                    .literal_separator(true)
                    .build()?
                    .compile_matcher(),
            ),
        };

        Ok(Self {
            source: source.to_string(),
            matcher,
        })
    }

    /// The pattern as written in the configuration.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_regex(&self) -> bool {
        matches!(self.matcher, Matcher::Regex(_))
    }

    pub fn is_match(&self, path: &str) -> bool {
        match &self.matcher {
            Matcher::Regex(re) => re.is_match(path),
            Matcher::Glob(glob) => glob.is_match(path),
        }
    }

    /// Remove the leading part of `path` up to the end of the match.
    ///
    /// Used to place asset files: with `/^(static)/`, `static/img/a.png`
    /// becomes `img/a.png`. Globs match whole paths, so they leave the path
    /// untouched, as does a regex that does not match or that consumes the
    /// entire path.
    pub fn strip_match<'a>(&self, path: &'a str) -> &'a str {
        let Matcher::Regex(re) = &self.matcher else {
            return path;
        };

        match re.find(path) {
            Some(found) => {
                let rest = path[found.end()..].trim_start_matches('/');
                if rest.is_empty() { path } else { rest }
            }
            None => path,
        }
    }
}

/// Flags a JavaScript regex literal may carry. Only `i` is honoured.
const REGEX_FLAGS: &str = "dgimsuvy";

/// Split `/body/flags` into its parts; `None` for anything else.
///
/// A trailing segment that is not made of regex flags makes the source a
/// rooted path, so `/app/main` stays a glob.
fn regex_literal(source: &str) -> Option<(&str, &str)> {
    let inner = source.strip_prefix('/')?;
    let end = inner.rfind('/')?;
    let (body, flags) = (&inner[..end], &inner[end + 1..]);
    if flags.chars().all(|c| REGEX_FLAGS.contains(c)) {
        Some((body, flags))
    } else {
        None
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for Pattern {}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl Serialize for Pattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.source)
    }
}
