//! Source enumeration.
//!
//! The resolver never touches the filesystem itself; it asks a
//! [`SourceScanner`] for the candidate files under the watched paths.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Result;

/// Enumerates candidate source files.
///
/// Returned paths are relative to the project root and use forward slashes.
/// Order matters: it is the declaration order files are concatenated in.
pub trait SourceScanner {
    fn scan(&self, watched: &[String]) -> Result<Vec<String>>;
}

/// Walks watched directories on disk, in sorted order.
#[derive(Debug, Clone)]
pub struct FsScanner {
    root: PathBuf,
}

impl FsScanner {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl SourceScanner for FsScanner {
    fn scan(&self, watched: &[String]) -> Result<Vec<String>> {
        let mut files = Vec::new();

        for dir in watched {
            let start = self.root.join(dir);
            if !start.exists() {
                tracing::debug!(path = %start.display(), "watched path does not exist, skipping");
                continue;
            }

            for entry in WalkDir::new(&start).sort_by_file_name() {
                let entry = entry.map_err(std::io::Error::from)?;
                if !entry.file_type().is_file() {
                    continue;
                }
                let Ok(relative) = entry.path().strip_prefix(&self.root) else {
                    continue;
                };
                files.push(to_slash(relative));
            }
        }

        tracing::debug!(files = files.len(), "scanned watched paths");
        Ok(files)
    }
}

/// Serves a fixed list of files; for tests and in-memory projects.
#[derive(Debug, Clone, Default)]
pub struct StaticScanner {
    files: Vec<String>,
}

impl StaticScanner {
    pub fn new<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            files: files.into_iter().map(Into::into).collect(),
        }
    }
}

impl SourceScanner for StaticScanner {
    fn scan(&self, _watched: &[String]) -> Result<Vec<String>> {
        Ok(self.files.clone())
    }
}

fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
