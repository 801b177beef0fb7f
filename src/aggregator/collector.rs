//! Walks a project and writes the collected document.

use super::summary::CollectReport;
use crate::discovery::{DirectoryWalker, EntryKind, ProjectEntry, WalkConfig, decode_text};
use crate::error::{CollectError, Result, SkipReason, Warning};
use crate::filter::PathFilter;
use crate::output::DocumentWriter;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// What to do when the output file already exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverwritePolicy {
    #[default]
    Overwrite,
    FailIfExists,
}

/// Everything the aggregator needs for one run.
#[derive(Debug, Clone)]
pub struct CollectOptions {
    pub filter: PathFilter,
    /// Write the directory tree section.
    pub tree: bool,
    /// Skip files larger than this many bytes.
    pub max_file_size: Option<u64>,
    pub follow_symlinks: bool,
    pub max_depth: Option<usize>,
}

impl CollectOptions {
    pub fn new(filter: PathFilter) -> Self {
        Self {
            filter,
            tree: true,
            max_file_size: None,
            follow_symlinks: false,
            max_depth: None,
        }
    }

    pub fn with_tree(mut self, tree: bool) -> Self {
        self.tree = tree;
        self
    }

    pub fn with_max_file_size(mut self, limit: Option<u64>) -> Self {
        self.max_file_size = limit;
        self
    }

    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    pub fn with_max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self::new(PathFilter::new())
    }
}

/// Concatenates the included files of a project into one document.
pub struct Aggregator {
    options: CollectOptions,
}

impl Aggregator {
    pub fn new(options: CollectOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CollectOptions {
        &self.options
    }

    /// Check that `root` is a readable directory and return its canonical
    /// path.
    pub fn validate_root(root: &Path) -> Result<PathBuf> {
        let metadata = fs::metadata(root).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                CollectError::RootNotFound(root.to_path_buf())
            } else {
                CollectError::RootUnreadable {
                    path: root.to_path_buf(),
                    source: e,
                }
            }
        })?;

        if !metadata.is_dir() {
            return Err(CollectError::NotADirectory(root.to_path_buf()));
        }

        let unreadable = |e| CollectError::RootUnreadable {
            path: root.to_path_buf(),
            source: e,
        };
        fs::read_dir(root).map_err(unreadable)?;
        root.canonicalize().map_err(unreadable)
    }

    /// Collect `root` into an arbitrary sink.
    pub fn collect<W: Write>(&self, root: &Path, sink: W) -> Result<CollectReport> {
        let root = Self::validate_root(root)?;
        self.run(&root, sink, &[]).map_err(CollectError::Write)
    }

    /// Collect `root` into the file at `output`.
    ///
    /// The document is written to a temporary file in the destination
    /// directory and moved into place only when the walk completes, so a
    /// failed run never leaves a partial document behind.
    pub fn collect_to_file(
        &self,
        root: &Path,
        output: &Path,
        policy: OverwritePolicy,
    ) -> Result<CollectReport> {
        let root = Self::validate_root(root)?;

        if policy == OverwritePolicy::FailIfExists && output.exists() {
            return Err(CollectError::OutputExists(output.to_path_buf()));
        }

        let write_error = |source: io::Error| CollectError::OutputWrite {
            path: output.to_path_buf(),
            source,
        };

        let parent = match output.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let parent = parent.canonicalize().map_err(write_error)?;
        let file_name = output.file_name().ok_or_else(|| {
            write_error(io::Error::new(
                io::ErrorKind::InvalidInput,
                "output path has no file name",
            ))
        })?;
        let destination = parent.join(file_name);

        let mut temp = NamedTempFile::new_in(&parent).map_err(write_error)?;
        let skip = [destination.clone(), temp.path().to_path_buf()];

        let report = self
            .run(&root, BufWriter::new(temp.as_file_mut()), &skip)
            .map_err(write_error)?;

        match policy {
            OverwritePolicy::Overwrite => {
                temp.persist(&destination).map_err(|e| write_error(e.error))?;
            }
            OverwritePolicy::FailIfExists => {
                temp.persist_noclobber(&destination).map_err(|e| {
                    if e.error.kind() == io::ErrorKind::AlreadyExists {
                        CollectError::OutputExists(output.to_path_buf())
                    } else {
                        write_error(e.error)
                    }
                })?;
            }
        }

        info!(
            output = %destination.display(),
            files = report.files_written(),
            bytes = report.bytes_written,
            "Document written"
        );
        Ok(report)
    }

    fn run<W: Write>(&self, root: &Path, sink: W, skip: &[PathBuf]) -> io::Result<CollectReport> {
        info!(root = %root.display(), rules = self.options.filter.len(), "Collecting project");

        let mut report = CollectReport {
            root: root.to_path_buf(),
            ..CollectReport::default()
        };
        let entries = self.discover(root, skip, &mut report.warnings);
        report.directories = entries.iter().filter(|e| e.is_dir()).count();

        let mut writer = DocumentWriter::new(sink);
        writer.write_preamble(&project_name(root))?;
        if self.options.tree {
            writer.write_tree(&entries)?;
        }

        for entry in entries.iter().filter(|e| e.kind == EntryKind::File) {
            match self.read_entry(entry) {
                Ok(content) => {
                    debug!(path = %entry.relative, bytes = content.len(), "Writing file");
                    writer.write_file(&entry.relative, &content)?;
                    report.files.push(entry.relative.clone());
                }
                Err(reason) => {
                    let warning = Warning::SkippedFile {
                        path: entry.relative.clone(),
                        reason,
                    };
                    debug!(%warning, "Recorded warning");
                    report.warnings.push(warning);
                }
            }
        }

        report.bytes_written = writer.bytes_written();
        writer.finish()?;
        Ok(report)
    }

    fn discover(
        &self,
        root: &Path,
        skip: &[PathBuf],
        warnings: &mut Vec<Warning>,
    ) -> Vec<ProjectEntry> {
        let mut config = WalkConfig::default().with_follow_symlinks(self.options.follow_symlinks);
        if let Some(depth) = self.options.max_depth {
            config = config.with_max_depth(depth);
        }
        for path in skip {
            config = config.with_skip_path(path);
        }

        let walker = DirectoryWalker::new(config, &self.options.filter);
        let mut entries = Vec::new();
        let mut broken_dirs: Vec<String> = Vec::new();
        for item in walker.walk(root) {
            match item {
                Ok(entry) if has_line_break(&entry.relative) => {
                    // Below a dropped directory: already reported.
                    let reported = broken_dirs
                        .iter()
                        .any(|dir| entry.relative.starts_with(&format!("{dir}/")));
                    if !reported {
                        let warning = if entry.is_dir() {
                            Warning::SkippedDirectory {
                                path: entry.relative.clone(),
                                reason: SkipReason::LineBreakInName.to_string(),
                            }
                        } else {
                            Warning::SkippedFile {
                                path: entry.relative.clone(),
                                reason: SkipReason::LineBreakInName,
                            }
                        };
                        debug!(%warning, "Recorded warning");
                        warnings.push(warning);
                    }
                    if entry.is_dir() {
                        broken_dirs.push(entry.relative);
                    }
                }
                Ok(entry) => entries.push(entry),
                Err(warning) => {
                    debug!(%warning, "Recorded warning");
                    warnings.push(warning);
                }
            }
        }
        debug!(entries = entries.len(), "Walk complete");
        entries
    }

    fn read_entry(&self, entry: &ProjectEntry) -> std::result::Result<String, SkipReason> {
        if let Some(limit) = self.options.max_file_size {
            let size = fs::metadata(&entry.path)
                .map_err(|e| SkipReason::Unreadable(e.to_string()))?
                .len();
            if size > limit {
                return Err(SkipReason::TooLarge { size, limit });
            }
        }

        let bytes = fs::read(&entry.path).map_err(|e| SkipReason::Unreadable(e.to_string()))?;
        decode_text(bytes).ok_or(SkipReason::NotText)
    }
}

/// Header lines and tree lines are single-line.
fn has_line_break(relative: &str) -> bool {
    relative.contains(['\n', '\r'])
}

fn project_name(root: &Path) -> String {
    root.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string())
}
