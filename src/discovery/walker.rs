//! Filtered, deterministic directory walking.

use crate::error::{SkipReason, Warning};
use crate::filter::PathFilter;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::trace;
use walkdir::{DirEntry, WalkDir};

/// Configuration for directory walking.
#[derive(Debug, Clone, Default)]
pub struct WalkConfig {
    /// Maximum depth to traverse. None means unlimited.
    pub max_depth: Option<usize>,
    /// Whether to follow symbolic links.
    pub follow_symlinks: bool,
    /// Absolute paths never yielded (e.g. the output file itself).
    pub skip_paths: Vec<PathBuf>,
}

impl WalkConfig {
    /// Set maximum depth.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Set whether to follow symlinks.
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Never yield this path.
    pub fn with_skip_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.skip_paths.push(path.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// A path discovered by the walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectEntry {
    /// Path as found on disk.
    pub path: PathBuf,
    /// Path relative to the walk root, `/`-separated.
    pub relative: String,
    pub kind: EntryKind,
    /// 1 for direct children of the root.
    pub depth: usize,
}

impl ProjectEntry {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// Final path component.
    pub fn name(&self) -> &str {
        self.relative.rsplit('/').next().unwrap_or(&self.relative)
    }
}

/// `path` relative to `root`, joined with `/` on every platform.
pub fn relative_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Directory walker that consults a [`PathFilter`] for every entry.
///
/// Siblings are visited in file name order. Excluded directories are
/// pruned, so nothing below them is visited or evaluated.
pub struct DirectoryWalker<'a> {
    config: WalkConfig,
    filter: &'a PathFilter,
}

impl<'a> DirectoryWalker<'a> {
    /// Create a new DirectoryWalker with the given configuration.
    pub fn new(config: WalkConfig, filter: &'a PathFilter) -> Self {
        Self { config, filter }
    }

    fn admits(&self, root: &Path, entry: &DirEntry) -> bool {
        if entry.depth() == 0 {
            return true;
        }
        if self.config.skip_paths.iter().any(|p| p == entry.path()) {
            trace!(path = %entry.path().display(), "Skipping reserved path");
            return false;
        }
        let relative = relative_path(root, entry.path());
        !self
            .filter
            .evaluate(&relative, entry.file_type().is_dir())
            .is_excluded()
    }

    /// Walk `root` and yield included entries, or a warning for each entry
    /// that could not be read. Entries that are directories on disk give
    /// `SkippedDirectory`; anything else (e.g. a dangling link when following
    /// symlinks) gives `SkippedFile`.
    pub fn walk(&self, root: &Path) -> impl Iterator<Item = Result<ProjectEntry, Warning>> + '_ {
        let filter_root = root.to_path_buf();
        let map_root = root.to_path_buf();

        let mut walker = WalkDir::new(root)
            .min_depth(1)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name();

        if let Some(depth) = self.config.max_depth {
            walker = walker.max_depth(depth);
        }

        walker
            .into_iter()
            .filter_entry(move |e| self.admits(&filter_root, e))
            .filter_map(move |result| match result {
                Ok(entry) => {
                    let kind = if entry.file_type().is_dir() {
                        EntryKind::Directory
                    } else if entry.file_type().is_file() {
                        EntryKind::File
                    } else {
                        trace!(path = %entry.path().display(), "Skipping special file");
                        return None;
                    };
                    Some(Ok(ProjectEntry {
                        relative: relative_path(&map_root, entry.path()),
                        depth: entry.depth(),
                        kind,
                        path: entry.into_path(),
                    }))
                }
                Err(err) => {
                    let path = err
                        .path()
                        .map(|p| relative_path(&map_root, p))
                        .unwrap_or_default();
                    let reason = err
                        .io_error()
                        .map(|e| e.to_string())
                        .unwrap_or_else(|| err.to_string());
                    let is_dir = err
                        .path()
                        .and_then(|p| fs::metadata(p).ok())
                        .is_some_and(|m| m.is_dir());
                    if is_dir {
                        Some(Err(Warning::SkippedDirectory { path, reason }))
                    } else {
                        Some(Err(Warning::SkippedFile {
                            path,
                            reason: SkipReason::Unreadable(reason),
                        }))
                    }
                }
            })
    }
}
