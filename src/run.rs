//! Run mode: merge configuration with CLI flags and collect the project.

use crate::aggregator::{Aggregator, CollectOptions, CollectReport, OverwritePolicy};
use crate::cli::{Cli, SummaryFormat};
use crate::config::Config;
use crate::error::Result;
use crate::filter::sources::load_rules;
use crate::reporter::{JsonReporter, Reporter, TerminalReporter};
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;
use tracing::{debug, error, info};

/// Load the configuration for `root` and apply CLI flags on top.
///
/// An explicit `--config` must load; discovered config files are optional.
pub fn effective_config(cli: &Cli, root: &Path) -> Result<Config> {
    let mut config = match cli.config {
        Some(ref path) => Config::from_file(path)?,
        None => Config::discover(root),
    };
    apply_cli(&mut config, cli);
    Ok(config)
}

/// List flags extend the configured lists; switches override.
pub fn apply_cli(config: &mut Config, cli: &Cli) {
    config.ignore.names.extend(cli.ignore_files.iter().cloned());
    config
        .ignore
        .extensions
        .extend(cli.ignore_extensions.iter().cloned());
    config.ignore.patterns.extend(cli.exclude.iter().cloned());

    if let Some(ref ignore_file) = cli.ignore_file {
        config.ignore.ignore_file = Some(ignore_file.clone());
    }
    if cli.no_gitignore {
        config.ignore.use_gitignore = false;
        config.ignore.ignore_file = None;
    }

    if cli.no_tree {
        config.output.tree = false;
    }
    if cli.no_clobber {
        config.output.overwrite = false;
    }
    if let Some(limit) = cli.max_file_size {
        config.output.max_file_size = limit;
    }
    if cli.follow_symlinks {
        config.output.follow_symlinks = true;
    }
}

/// Collect the project described by `cli` into its output file.
pub fn collect(cli: &Cli) -> Result<CollectReport> {
    let root = Aggregator::validate_root(&cli.target_directory)?;
    let config = effective_config(cli, &root)?;
    debug!(?config, "Effective configuration");

    let (filter, rule_warnings) = load_rules(&root, &config.ignore)?;
    let options = CollectOptions::new(filter)
        .with_tree(config.output.tree)
        .with_max_file_size(config.output.size_limit())
        .with_follow_symlinks(config.output.follow_symlinks)
        .with_max_depth(cli.max_depth);
    let policy = if config.output.overwrite {
        OverwritePolicy::Overwrite
    } else {
        OverwritePolicy::FailIfExists
    };

    let mut report = Aggregator::new(options).collect_to_file(&root, &cli.output_file, policy)?;
    let mut warnings = rule_warnings;
    warnings.append(&mut report.warnings);
    report.warnings = warnings;
    Ok(report)
}

/// Run normal collection mode.
pub fn run(cli: &Cli) -> ExitCode {
    info!(
        root = %cli.target_directory.display(),
        output = %cli.output_file.display(),
        "Starting collection"
    );

    match collect(cli) {
        Ok(report) => {
            if !cli.quiet {
                let summary = match cli.summary {
                    SummaryFormat::Terminal => {
                        TerminalReporter::new(cli.verbose).report(&report, &cli.output_file)
                    }
                    SummaryFormat::Json => JsonReporter::new().report(&report, &cli.output_file),
                };
                println!("{}", summary.trim_end());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, fatal_input = e.is_fatal_input(), "Collection failed");
            eprintln!("{} {}", "error:".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CollectError, Warning};
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["code-collector"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_apply_cli_extends_lists_and_overrides_switches() {
        let mut config = Config::default();
        config.ignore.names.push("dist".to_string());

        let cli = cli(&[
            "--ignore-files",
            "node_modules",
            "--ignore-extensions",
            ".log",
            "-x",
            "*.snap",
            "--no-tree",
            "--no-clobber",
            "--max-file-size",
            "10",
            "--",
            "p",
            "o.md",
        ]);
        apply_cli(&mut config, &cli);

        assert_eq!(config.ignore.names, vec!["dist", "node_modules"]);
        assert_eq!(config.ignore.extensions, vec![".log"]);
        assert_eq!(config.ignore.patterns, vec!["*.snap"]);
        assert!(!config.output.tree);
        assert!(!config.output.overwrite);
        assert_eq!(config.output.size_limit(), Some(10));
    }

    #[test]
    fn test_apply_cli_no_gitignore() {
        let mut config = Config::default();
        apply_cli(&mut config, &cli(&["--no-gitignore", "p", "o.md"]));
        assert!(!config.ignore.use_gitignore);
    }

    #[test]
    fn test_explicit_config_must_load() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.toml");
        let cli = cli(&["-c", missing.to_str().unwrap(), "p", "o.md"]);

        assert!(matches!(
            effective_config(&cli, dir.path()),
            Err(CollectError::Config(_))
        ));
    }

    #[test]
    fn test_collect_reports_rule_warnings_first() {
        let project = TempDir::new().unwrap();
        fs::write(project.path().join("a.txt"), "alpha").unwrap();
        fs::write(project.path().join("bin.dat"), [0u8, 1, 2]).unwrap();
        let out = TempDir::new().unwrap();
        let output = out.path().join("out.md");

        let cli = cli(&[
            "-x",
            "src/[",
            project.path().to_str().unwrap(),
            output.to_str().unwrap(),
        ]);
        let report = collect(&cli).unwrap();

        assert_eq!(report.files, vec!["a.txt"]);
        assert_eq!(report.warnings.len(), 2);
        assert!(matches!(report.warnings[0], Warning::MalformedRule { .. }));
        assert!(matches!(report.warnings[1], Warning::SkippedFile { .. }));
    }

    #[test]
    fn test_collect_uses_project_config() {
        let project = TempDir::new().unwrap();
        fs::write(project.path().join("a.txt"), "alpha").unwrap();
        fs::write(project.path().join("b.md"), "beta").unwrap();
        fs::write(
            project.path().join(".code-collector.toml"),
            "[ignore]\nextensions = [\".md\", \".toml\"]\n\n[output]\ntree = false\n",
        )
        .unwrap();
        let out = TempDir::new().unwrap();
        let output = out.path().join("out.md");

        let cli = cli(&[project.path().to_str().unwrap(), output.to_str().unwrap()]);
        let report = collect(&cli).unwrap();

        assert_eq!(report.files, vec!["a.txt"]);
        let doc = fs::read_to_string(&output).unwrap();
        assert!(!doc.contains("Project Directory Tree"));
    }

    #[test]
    fn test_collect_missing_root() {
        let out = TempDir::new().unwrap();
        let output = out.path().join("out.md");
        let cli = cli(&["/definitely/not/here", output.to_str().unwrap()]);

        let err = collect(&cli).unwrap_err();
        assert!(err.is_fatal_input());
        assert!(!output.exists());
    }
}
