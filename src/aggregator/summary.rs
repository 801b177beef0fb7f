//! Run report for a collection.

use crate::error::{SkipReason, Warning};
use serde::Serialize;
use std::path::PathBuf;

/// Outcome of a successful collection run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CollectReport {
    /// Canonical project root.
    pub root: PathBuf,
    /// Files written into the document, in document order.
    pub files: Vec<String>,
    /// Directories included in the walk.
    pub directories: usize,
    /// Size of the document.
    pub bytes_written: u64,
    /// Recoverable problems, in the order they occurred.
    pub warnings: Vec<Warning>,
}

impl CollectReport {
    pub fn files_written(&self) -> usize {
        self.files.len()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Files left out because they could not be read or were not text.
    pub fn skipped_files(&self) -> impl Iterator<Item = (&str, &SkipReason)> {
        self.warnings.iter().filter_map(|w| match w {
            Warning::SkippedFile { path, reason } => Some((path.as_str(), reason)),
            _ => None,
        })
    }

    pub fn malformed_rules(&self) -> usize {
        self.warnings
            .iter()
            .filter(|w| matches!(w, Warning::MalformedRule { .. }))
            .count()
    }
}
