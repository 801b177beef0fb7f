use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum SummaryFormat {
    #[default]
    Terminal,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "code-collector",
    version,
    about = "Collect a project's source files into a single Markdown document",
    long_about = "code-collector walks a project directory, skips paths matched by .gitignore-style \
                  rules, and writes the directory tree and every remaining text file into one \
                  Markdown document for review or for use as LLM context."
)]
pub struct Cli {
    /// Project directory to collect
    pub target_directory: PathBuf,

    /// Markdown file to write
    pub output_file: PathBuf,

    /// Do not include the project directory tree
    #[arg(long)]
    pub no_tree: bool,

    /// File or directory names to ignore anywhere in the tree
    #[arg(long, num_args = 0.., value_name = "NAME")]
    pub ignore_files: Vec<String>,

    /// File suffixes to ignore (e.g. .log .tmp)
    #[arg(long, num_args = 0.., value_name = "EXT")]
    pub ignore_extensions: Vec<String>,

    /// Extra .gitignore-style pattern (repeatable)
    #[arg(short = 'x', long = "exclude", value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Ignore file to use instead of <TARGET_DIRECTORY>/.gitignore
    #[arg(long, value_name = "PATH")]
    pub ignore_file: Option<PathBuf>,

    /// Do not read <TARGET_DIRECTORY>/.gitignore
    #[arg(long, conflicts_with = "ignore_file")]
    pub no_gitignore: bool,

    /// Configuration file (toml, yaml or json)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Fail instead of overwriting an existing output file
    #[arg(long)]
    pub no_clobber: bool,

    /// Skip files larger than this many bytes
    #[arg(long, value_name = "BYTES")]
    pub max_file_size: Option<u64>,

    /// Maximum directory depth to descend
    #[arg(long, value_name = "DEPTH")]
    pub max_depth: Option<usize>,

    /// Follow symbolic links
    #[arg(short = 'L', long)]
    pub follow_symlinks: bool,

    /// Summary format
    #[arg(long, value_enum, default_value_t = SummaryFormat::Terminal)]
    pub summary: SummaryFormat,

    /// Verbose output
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Print nothing on success
    #[arg(short, long)]
    pub quiet: bool,
}
