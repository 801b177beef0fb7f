//! Configuration error types.

use super::loading::ConfigFormat;
use std::path::{Path, PathBuf};

/// A configuration file that could not be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config file {} is not valid {format}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        format: ConfigFormat,
        #[source]
        source: ParseError,
    },

    #[error(
        "Config file {} has no supported extension (expected .toml, .yaml, .yml or .json)",
        .path.display()
    )]
    UnknownFormat { path: PathBuf },
}

impl ConfigError {
    /// The configuration file the error is about.
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::UnknownFormat { path } => path,
        }
    }
}

/// Deserializer failure for one of the supported formats.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
