//! CLI argument definitions using clap

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Kotlin function miner for code-generation datasets
#[derive(Parser, Debug)]
#[command(name = "ktmine")]
#[command(about = "Mines Kotlin corpora for function declarations and emits tabular records")]
#[command(version)]
pub struct Cli {
    /// Corpus directory, scanned recursively for .kt and .kts files
    #[arg(value_name = "CORPUS_DIR")]
    pub corpus: PathBuf,

    /// Destination for the function table
    #[arg(long, value_name = "PATH", default_value = "functions.csv")]
    pub functions_out: PathBuf,

    /// Also write the downstream text-generation dataset to this path
    #[arg(long, value_name = "PATH")]
    pub dataset_out: Option<PathBuf>,

    /// Output format for the function table
    #[arg(short, long, default_value = "csv", value_enum)]
    pub format: OutputFormat,

    /// Keep functions whose body is empty ("" or "{}")
    #[arg(long)]
    pub keep_empty: bool,

    /// Sample Kotlin file for golden verification before the corpus run
    #[arg(
        long,
        value_name = "PATH",
        requires = "golden_table",
        requires = "golden_out"
    )]
    pub golden_sample: Option<PathBuf>,

    /// Golden CSV with the expected extraction for the sample file
    #[arg(long, value_name = "PATH", requires = "golden_sample")]
    pub golden_table: Option<PathBuf>,

    /// Where to write the verified golden extraction on success
    #[arg(long, value_name = "PATH", requires = "golden_sample")]
    pub golden_out: Option<PathBuf>,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Show verbose output including per-file skip counts
    #[arg(short, long)]
    pub verbose: bool,
}

/// Output format options
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Comma-separated values, one row per function
    #[default]
    Csv,
    /// JSON array of row objects
    Json,
}
