//! Error and warning types for code-collector.
//!
//! `CollectError` aborts a run. `Warning` is recoverable: it is recorded in
//! the run report and the walk continues.

use crate::config::ConfigError;
use crate::filter::RuleSource;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors that abort a collection run.
#[derive(Error, Debug)]
pub enum CollectError {
    #[error("Target directory not found: {0}")]
    RootNotFound(PathBuf),

    #[error("Path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Failed to read target directory {path}: {source}")]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read ignore file {path}: {source}")]
    IgnoreFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Output file already exists: {0}")]
    OutputExists(PathBuf),

    #[error("Failed to write output to {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write output document: {0}")]
    Write(#[source] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl CollectError {
    /// True for errors about the target directory itself. These are raised
    /// before any output is created.
    pub fn is_fatal_input(&self) -> bool {
        matches!(
            self,
            CollectError::RootNotFound(_)
                | CollectError::NotADirectory(_)
                | CollectError::RootUnreadable { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, CollectError>;

/// Why a file was left out of the output document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The file could not be opened or read.
    Unreadable(String),
    /// The content is not valid UTF-8 or contains NUL bytes.
    NotText,
    /// The file exceeds the configured size limit.
    TooLarge { size: u64, limit: u64 },
    /// The path contains a line break and cannot be written as a header.
    LineBreakInName,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Unreadable(reason) => write!(f, "{}", reason),
            SkipReason::NotText => write!(f, "not a UTF-8 text file"),
            SkipReason::TooLarge { size, limit } => {
                write!(f, "file is {} bytes, limit is {} bytes", size, limit)
            }
            SkipReason::LineBreakInName => write!(f, "name contains a line break"),
        }
    }
}

/// Recoverable conditions collected during a run and reported at the end.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    #[error("Skipping file {path}: {reason}")]
    SkippedFile { path: String, reason: SkipReason },

    #[error("Skipping directory {path}: {reason}")]
    SkippedDirectory { path: String, reason: String },

    #[error("Ignoring malformed rule '{pattern}' ({origin}): {message}")]
    MalformedRule {
        origin: RuleSource,
        pattern: String,
        message: String,
    },
}

impl Warning {
    /// The relative path this warning is about, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            Warning::SkippedFile { path, .. } | Warning::SkippedDirectory { path, .. } => {
                Some(path)
            }
            Warning::MalformedRule { .. } => None,
        }
    }
}
