use clap::Parser;
use std::path::PathBuf;

use crate::DigestAlgorithm;

/// Recursively hash every file under a scan location and write a CSV report.
#[derive(Clone, Parser)]
#[command(name = "hashsweep", version)]
#[command(
    about = "Hash all files (in parallel) under a directory, or a single file, into a CSV report."
)]
pub struct Cli {
    /// Location to recursively scan for file(s). May also be a single file.
    #[arg(
        long = "scan",
        short = 's',
        visible_aliases = ["scan-location", "location"],
        value_name = "PATH"
    )]
    pub scan: PathBuf,

    /// Output report file. Default: hash_report.csv in the current directory.
    #[arg(long, short = 'r', value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Case label written on every row. Default: no-case.
    #[arg(long = "case", short = 'c', visible_aliases = ["case-label", "label"])]
    pub case_label: Option<String>,

    /// Maximum size of a file that will be hashed, in bytes. Default: 1 GiB.
    #[arg(long = "max-hash-size", short = 'm', visible_aliases = ["max", "max-file-size"])]
    pub max_hash_size: Option<u64>,

    /// Minimal fields: relative path, one combined date-time column, no uppercase hash.
    #[arg(
        long,
        short = 'b',
        visible_aliases = ["simple-output", "basic"],
        num_args = 0..=1,
        default_missing_value = "true",
        value_parser = clap::value_parser!(bool)
    )]
    pub simple: Option<bool>,

    /// Only hash the first N files found (for testing).
    #[arg(long = "first", short = 'n', value_name = "N")]
    pub first_n: Option<usize>,

    /// Hash worker count. Default: available cores minus one.
    #[arg(long, short = 'w')]
    pub workers: Option<usize>,

    /// Digest algorithm.
    #[arg(long, short = 'a', value_enum)]
    pub algorithm: Option<DigestAlgorithm>,

    /// Walk directories in parallel (jwalk) instead of serially.
    #[arg(
        long,
        num_args = 0..=1,
        default_missing_value = "true",
        value_parser = clap::value_parser!(bool)
    )]
    pub parallel_walk: Option<bool>,

    /// Follow symbolic links.
    #[arg(
        long,
        short = 'f',
        num_args = 0..=1,
        default_missing_value = "true",
        value_parser = clap::value_parser!(bool)
    )]
    pub follow_links: Option<bool>,

    /// Verbose output (debug logging and a progress counter).
    #[arg(
        long,
        short = 'v',
        num_args = 0..=1,
        default_missing_value = "true",
        value_parser = clap::value_parser!(bool)
    )]
    pub verbose: Option<bool>,
}
