//! Collect a project's source files into a single Markdown document.
//!
//! The pipeline has two parts:
//! - [`filter::PathFilter`] decides, per relative path, whether it is
//!   included, using `.gitignore`-style rules.
//! - [`aggregator::Aggregator`] walks the project in a fixed order, reads
//!   each included text file and writes it under a path header.

pub mod aggregator;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod filter;
pub mod output;
pub mod reporter;
pub mod run;

pub use aggregator::{Aggregator, CollectOptions, CollectReport, OverwritePolicy};
pub use cli::{Cli, SummaryFormat};
pub use config::Config;
pub use error::{CollectError, Result, SkipReason, Warning};
pub use filter::{Decision, IgnoreRule, PathFilter, RuleKind, RuleSetBuilder, RuleSource};
pub use output::{Section, split_sections};
pub use run::run;
