//! CLI argument parsing using clap.

use clap::Parser;
use clap_complete::Shell;
use std::path::PathBuf;
use xpack_core::creation::filters::DEFAULT_OUTPUT_NAME;

/// Every flag is optional: a bare `xpack` packages the working directory
/// with the compiled-in defaults.
#[derive(Parser)]
#[command(name = "xpack")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to package (default: current directory)
    #[arg(short = 'C', long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Output file name, created inside the root and never archived
    #[arg(short, long, value_name = "NAME", default_value = DEFAULT_OUTPUT_NAME)]
    pub output: String,

    /// Additional file or directory name to exclude (can be repeated)
    #[arg(long = "exclude", short = 'x', value_name = "NAME")]
    pub exclude: Vec<String>,

    /// Deflate compression level (1-9)
    #[arg(short = 'l', long, value_parser = clap::value_parser!(u8).range(1..=9))]
    pub compression_level: Option<u8>,

    /// List the entries that would be written without creating the archive
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Re-read the archive after writing and check its entry count
    #[arg(long, conflicts_with = "dry_run")]
    pub verify: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long)]
    pub json: bool,

    /// Print shell completions and exit
    #[arg(long, value_name = "SHELL")]
    pub completions: Option<Shell>,
}
