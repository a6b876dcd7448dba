//! File system watcher with debouncing for `joinery watch`.
//!
//! Watches the project root recursively and forwards relevant changes over a
//! tokio channel. Hidden files and paths matching an ignore pattern never
//! reach the channel.

use crate::error::{CliError, Result};
use joinery_config::Pattern;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// File change event type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileChange {
    Modified(PathBuf),
    Created(PathBuf),
    Removed(PathBuf),
}

impl FileChange {
    /// Get the path affected by this change.
    pub fn path(&self) -> &Path {
        match self {
            FileChange::Modified(p) | FileChange::Created(p) | FileChange::Removed(p) => p,
        }
    }

    fn from_kind(kind: &EventKind, path: PathBuf) -> Option<Self> {
        match kind {
            EventKind::Create(_) => Some(FileChange::Created(path)),
            EventKind::Modify(_) => Some(FileChange::Modified(path)),
            EventKind::Remove(_) => Some(FileChange::Removed(path)),
            _ => None,
        }
    }
}

/// Recursive watcher over a project root.
///
/// Dropping the watcher stops notifications; the receiver then yields `None`.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
    root: PathBuf,
}

impl FileWatcher {
    /// Start watching `root`.
    ///
    /// Repeated events for the same path within `debounce` are dropped.
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` if `root` does not exist, or the notify error
    /// if the platform watcher cannot be started.
    pub fn new(
        root: PathBuf,
        ignore: Vec<Pattern>,
        debounce: Duration,
    ) -> Result<(Self, mpsc::Receiver<FileChange>)> {
        if !root.exists() {
            return Err(CliError::FileNotFound(root));
        }

        let (tx, rx) = mpsc::channel(100);
        let mut last_event: Option<(PathBuf, Instant)> = None;
        let callback_root = root.clone();

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let event = match res {
                Ok(event) => event,
                Err(e) => {
                    tracing::warn!(error = %e, "file watcher error");
                    return;
                }
            };

            for path in event.paths {
                if should_ignore(&path, &callback_root, &ignore) {
                    continue;
                }

                let now = Instant::now();
                if let Some((last_path, last_time)) = &last_event {
                    if *last_path == path && now.duration_since(*last_time) < debounce {
                        continue;
                    }
                }
                last_event = Some((path.clone(), now));

                let Some(change) = FileChange::from_kind(&event.kind, path) else {
                    continue;
                };

                // The receiver is gone once the watch loop has exited.
                if tx.blocking_send(change).is_err() {
                    return;
                }
            }
        })?;

        watcher.watch(&root, RecursiveMode::Recursive)?;
        tracing::debug!(root = %root.display(), "watching project");

        Ok((
            Self {
                _watcher: watcher,
                root,
            },
            rx,
        ))
    }

    /// Get the root directory being watched.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Project-relative, forward-slash form of `path`, if it lies under `root`.
pub fn relative_path(path: &Path, root: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<_> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect();
    Some(parts.join("/"))
}

fn should_ignore(path: &Path, root: &Path, ignore: &[Pattern]) -> bool {
    let Some(relative) = relative_path(path, root) else {
        return true;
    };

    if relative
        .split('/')
        .any(|part| part.starts_with('.') && part != "." && part != "..")
    {
        return true;
    }

    ignore.iter().any(|pattern| pattern.is_match(&relative))
}
