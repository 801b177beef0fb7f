//! Configuration type definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for code-collector.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Which paths are left out of the document
    pub ignore: IgnoreConfig,
    /// How the document is produced
    pub output: OutputConfig,
}

/// Ignore rule sources, applied in field order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IgnoreConfig {
    /// Built-in gitignore-style patterns
    pub defaults: Vec<String>,
    /// File or directory names to ignore anywhere in the tree
    pub names: Vec<String>,
    /// File suffixes to ignore (e.g. [".log", "tmp"])
    pub extensions: Vec<String>,
    /// Extra gitignore-style patterns
    pub patterns: Vec<String>,
    /// Read `<root>/.gitignore` when present
    pub use_gitignore: bool,
    /// Ignore file to read instead of `<root>/.gitignore`
    pub ignore_file: Option<PathBuf>,
}

impl Default for IgnoreConfig {
    fn default() -> Self {
        Self {
            defaults: vec![".git/".to_string()],
            names: Vec::new(),
            extensions: Vec::new(),
            patterns: Vec::new(),
            use_gitignore: true,
            ignore_file: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Write the directory tree section
    pub tree: bool,
    /// Replace an existing output file
    pub overwrite: bool,
    /// Skip files larger than this many bytes (0 = unlimited)
    pub max_file_size: u64,
    /// Follow symbolic links while walking
    pub follow_symlinks: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            tree: true,
            overwrite: true,
            max_file_size: 0,
            follow_symlinks: false,
        }
    }
}

impl OutputConfig {
    pub fn size_limit(&self) -> Option<u64> {
        (self.max_file_size > 0).then_some(self.max_file_size)
    }
}
