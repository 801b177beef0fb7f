//! Configuration loading functions.

use std::fmt;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use super::error::{ConfigError, ParseError};
use super::types::Config;

/// Project-level config file names, in lookup order.
pub const PROJECT_CONFIG_FILES: &[&str] = &[
    ".code-collector.toml",
    ".code-collector.yaml",
    ".code-collector.yml",
    ".code-collector.json",
];

/// File formats a configuration can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Format implied by the file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "toml" => Some(ConfigFormat::Toml),
            "yaml" | "yml" => Some(ConfigFormat::Yaml),
            "json" => Some(ConfigFormat::Json),
            _ => None,
        }
    }

    fn parse(self, content: &str) -> Result<Config, ParseError> {
        Ok(match self {
            ConfigFormat::Toml => toml::from_str::<Config>(content)?,
            ConfigFormat::Yaml => serde_yaml::from_str::<Config>(content)?,
            ConfigFormat::Json => serde_json::from_str::<Config>(content)?,
        })
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConfigFormat::Toml => "TOML",
            ConfigFormat::Yaml => "YAML",
            ConfigFormat::Json => "JSON",
        })
    }
}

impl Config {
    /// Load configuration from a file. The format follows the extension.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let format = ConfigFormat::from_path(path).ok_or_else(|| ConfigError::UnknownFormat {
            path: path.to_path_buf(),
        })?;
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        format.parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            format,
            source,
        })
    }

    /// Discover configuration for a project.
    ///
    /// Search order:
    /// 1. `.code-collector.{toml,yaml,yml,json}` in the project root
    /// 2. `~/.config/code-collector/config.toml`
    /// 3. Default configuration
    ///
    /// Files that exist but fail to load are logged and skipped.
    pub fn discover(project_root: &Path) -> Self {
        let global = dirs::config_dir().map(|dir| dir.join("code-collector").join("config.toml"));

        let candidates = PROJECT_CONFIG_FILES
            .iter()
            .map(|name| project_root.join(name))
            .chain(global);

        for path in candidates {
            if !path.is_file() {
                continue;
            }
            match Self::from_file(&path) {
                Ok(config) => {
                    debug!(path = %path.display(), "Loaded configuration");
                    return config;
                }
                Err(e) => warn!(error = %e, "Skipping unusable config file"),
            }
        }

        Self::default()
    }
}
