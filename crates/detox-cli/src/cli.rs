//! CLI argument definitions for the corpus preparation tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "detox-prep",
    version,
    about = "Prepare a parallel text-detoxification dataset",
    long_about = "Prepare a parallel text-detoxification dataset.\n\n\
                  Loads a tab-separated corpus of sentence pairs with toxicity\n\
                  scores, removes the ambiguous middle band, canonicalizes the\n\
                  toxic/clean orientation, filters by translation toxicity, and\n\
                  writes deterministic train/validation/test CSV splits."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the preparation pipeline over a corpus file.
    Prepare(PrepareArgs),

    /// Profile the columns of a corpus file without transforming it.
    Inspect(InspectArgs),
}

#[derive(Parser)]
pub struct PrepareArgs {
    /// Path to the tab-separated source corpus.
    #[arg(value_name = "CORPUS_TSV")]
    pub input: PathBuf,

    /// Output directory for generated files (default: <CORPUS_DIR>/prepared).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// JSON file with preparation options; explicit flags override it.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Translation toxicity threshold (rows at or above it are dropped).
    #[arg(long = "threshold", value_name = "SCORE")]
    pub threshold: Option<f64>,

    /// First row rank of the uncertain band in the toxicity-sorted table.
    #[arg(long = "lower-bound", value_name = "RANK")]
    pub lower_bound: Option<usize>,

    /// One past the last row rank of the uncertain band.
    #[arg(long = "upper-bound", value_name = "RANK")]
    pub upper_bound: Option<usize>,

    /// Test set fraction of the cleaned table.
    #[arg(long = "test-size", value_name = "FRACTION")]
    pub test_size: Option<f64>,

    /// Validation set fraction of the cleaned table.
    #[arg(long = "valid-size", value_name = "FRACTION")]
    pub valid_size: Option<f64>,

    /// Seed for the randomized split.
    #[arg(long = "seed", value_name = "SEED")]
    pub seed: Option<u64>,

    /// Run every stage and report counts without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct InspectArgs {
    /// Path to the tab-separated source corpus.
    #[arg(value_name = "CORPUS_TSV")]
    pub input: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
