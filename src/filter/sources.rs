//! Assembling a [`PathFilter`] from layered rule sources.

use super::{IgnoreRule, PathFilter};
use crate::config::IgnoreConfig;
use crate::error::{CollectError, Result, Warning};
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name of the project ignore file read by default.
pub const GITIGNORE_FILE: &str = ".gitignore";

/// Where a rule came from. Reported in malformed rule warnings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleSource {
    /// `ignore.defaults` in the configuration.
    Default,
    /// A pattern given inline (`--exclude` or `ignore.patterns`).
    Inline,
    /// An extra ignore name (`--ignore-files` or `ignore.names`).
    Name,
    /// An extra ignore extension (`--ignore-extensions` or `ignore.extensions`).
    Extension,
    /// A line of an ignore file.
    IgnoreFile { path: PathBuf, line: usize },
}

impl fmt::Display for RuleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleSource::Default => write!(f, "default rule"),
            RuleSource::Inline => write!(f, "inline pattern"),
            RuleSource::Name => write!(f, "ignore name"),
            RuleSource::Extension => write!(f, "ignore extension"),
            RuleSource::IgnoreFile { path, line } => write!(f, "{}:{}", path.display(), line),
        }
    }
}

/// Accumulates rules in declaration order. Malformed rules are dropped and
/// recorded as warnings.
#[derive(Debug, Default)]
pub struct RuleSetBuilder {
    filter: PathFilter,
    warnings: Vec<Warning>,
}

impl RuleSetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one gitignore-style line.
    pub fn add_line(&mut self, line: &str, origin: RuleSource) -> &mut Self {
        match IgnoreRule::parse(line) {
            Ok(Some(rule)) => self.filter.push(rule),
            Ok(None) => {}
            Err(e) => self.malformed(line, origin, e.to_string()),
        }
        self
    }

    /// Add every line of an ignore file's content.
    pub fn add_text(&mut self, text: &str, path: &Path) -> &mut Self {
        for (idx, line) in text.lines().enumerate() {
            self.add_line(
                line,
                RuleSource::IgnoreFile {
                    path: path.to_path_buf(),
                    line: idx + 1,
                },
            );
        }
        self
    }

    /// Read and add an ignore file.
    pub fn add_file(&mut self, path: &Path) -> Result<&mut Self> {
        let text = fs::read_to_string(path).map_err(|e| CollectError::IgnoreFileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        debug!(path = %path.display(), "Loaded ignore file");
        Ok(self.add_text(&text, path))
    }

    /// Exclude files and directories with this exact name.
    pub fn add_name(&mut self, name: &str) -> &mut Self {
        match IgnoreRule::name(name) {
            Ok(rule) => self.filter.push(rule),
            Err(e) => self.malformed(name, RuleSource::Name, e.to_string()),
        }
        self
    }

    /// Exclude files whose name ends with this extension.
    pub fn add_extension(&mut self, extension: &str) -> &mut Self {
        match IgnoreRule::suffix(extension) {
            Ok(rule) => self.filter.push(rule),
            Err(e) => self.malformed(extension, RuleSource::Extension, e.to_string()),
        }
        self
    }

    fn malformed(&mut self, pattern: &str, origin: RuleSource, message: String) {
        debug!(pattern, %origin, %message, "Dropping malformed rule");
        self.warnings.push(Warning::MalformedRule {
            origin,
            pattern: pattern.to_string(),
            message,
        });
    }

    pub fn build(self) -> (PathFilter, Vec<Warning>) {
        (self.filter, self.warnings)
    }
}

/// Build the rule set for `root` from configuration.
///
/// Layers, in declaration order: defaults, names, extensions, inline
/// patterns, then the ignore file. An explicit `ignore_file` replaces
/// `<root>/.gitignore` and must be readable.
pub fn load_rules(root: &Path, config: &IgnoreConfig) -> Result<(PathFilter, Vec<Warning>)> {
    let mut builder = RuleSetBuilder::new();

    for pattern in &config.defaults {
        builder.add_line(pattern, RuleSource::Default);
    }
    for name in &config.names {
        builder.add_name(name);
    }
    for extension in &config.extensions {
        builder.add_extension(extension);
    }
    for pattern in &config.patterns {
        builder.add_line(pattern, RuleSource::Inline);
    }

    if let Some(ref ignore_file) = config.ignore_file {
        builder.add_file(ignore_file)?;
    } else if config.use_gitignore {
        let gitignore = root.join(GITIGNORE_FILE);
        if gitignore.is_file() {
            builder.add_file(&gitignore)?;
        }
    }

    let (filter, warnings) = builder.build();
    debug!(rules = filter.len(), warnings = warnings.len(), "Rule set ready");
    Ok((filter, warnings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config() -> IgnoreConfig {
        IgnoreConfig {
            defaults: Vec::new(),
            ..IgnoreConfig::default()
        }
    }

    #[test]
    fn test_malformed_rule_fails_open_with_warning() {
        let mut builder = RuleSetBuilder::new();
        builder
            .add_line("src/[", RuleSource::Inline)
            .add_line("*.log", RuleSource::Inline);
        let (filter, warnings) = builder.build();

        assert_eq!(filter.len(), 1);
        assert_eq!(warnings.len(), 1);
        assert!(matches!(
            &warnings[0],
            Warning::MalformedRule { pattern, origin: RuleSource::Inline, .. } if pattern == "src/["
        ));
        assert!(!filter.is_excluded("src/[", false));
        assert!(!filter.is_excluded("src/main.rs", false));
    }

    #[test]
    fn test_ignore_file_warnings_carry_line_numbers() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rules");
        fs::write(&path, "# header\n*.log\n!\n").unwrap();

        let mut builder = RuleSetBuilder::new();
        builder.add_file(&path).unwrap();
        let (_, warnings) = builder.build();

        assert_eq!(warnings.len(), 1);
        match &warnings[0] {
            Warning::MalformedRule { origin, .. } => {
                assert_eq!(origin.to_string(), format!("{}:3", path.display()));
            }
            other => panic!("unexpected warning: {:?}", other),
        }
    }

    #[test]
    fn test_missing_ignore_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let mut builder = RuleSetBuilder::new();
        let err = builder.add_file(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, CollectError::IgnoreFileRead { .. }));
    }

    #[test]
    fn test_load_rules_reads_gitignore() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".gitignore"), "*.log\n").unwrap();

        let (filter, warnings) = load_rules(dir.path(), &config()).unwrap();
        assert!(warnings.is_empty());
        assert!(filter.is_excluded("debug.log", false));
    }

    #[test]
    fn test_load_rules_without_gitignore() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".gitignore"), "*.log\n").unwrap();

        let cfg = IgnoreConfig {
            use_gitignore: false,
            ..config()
        };
        let (filter, _) = load_rules(dir.path(), &cfg).unwrap();
        assert!(filter.is_empty());
    }

    #[test]
    fn test_ignore_file_override_replaces_gitignore() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".gitignore"), "*.log\n").unwrap();
        let custom = dir.path().join("custom.ignore");
        fs::write(&custom, "*.tmp\n").unwrap();

        let cfg = IgnoreConfig {
            ignore_file: Some(custom),
            ..config()
        };
        let (filter, _) = load_rules(dir.path(), &cfg).unwrap();
        assert!(!filter.is_excluded("debug.log", false));
        assert!(filter.is_excluded("cache.tmp", false));
    }

    #[test]
    fn test_load_rules_layers_names_and_extensions() {
        let dir = TempDir::new().unwrap();
        let cfg = IgnoreConfig {
            defaults: vec![".git/".to_string()],
            names: vec!["node_modules".to_string()],
            extensions: vec!["lock".to_string(), ".bak".to_string()],
            patterns: vec!["/dist".to_string()],
            ..config()
        };
        let (filter, warnings) = load_rules(dir.path(), &cfg).unwrap();

        assert!(warnings.is_empty());
        assert_eq!(filter.len(), 5);
        assert!(filter.is_excluded(".git/HEAD", false));
        assert!(filter.is_excluded("web/node_modules/react/index.js", false));
        assert!(filter.is_excluded("Cargo.lock", false));
        assert!(filter.is_excluded("notes.bak", false));
        assert!(filter.is_excluded("dist", true));
        assert!(!filter.is_excluded("src/dist", true));
    }
}
