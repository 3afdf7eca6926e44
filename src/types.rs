//! Public and internal types for the hashsweep API and pipeline.

use chrono::{DateTime, Local};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::utils::config::{DEFAULT_CASE_LABEL, DEFAULT_MAX_HASH_SIZE, PackagePaths};

/// A resolved, existence-checked scan root. Classified once per run by
/// [`classify_root`](crate::engine::tools::classify_root) and never re-resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScanRoot {
    SingleFile(PathBuf),
    Directory(PathBuf),
}

impl ScanRoot {
    /// Absolute path of the root, whichever variant it is.
    pub fn path(&self) -> &Path {
        match self {
            ScanRoot::SingleFile(p) | ScanRoot::Directory(p) => p,
        }
    }

    pub fn is_single_file(&self) -> bool {
        matches!(self, ScanRoot::SingleFile(_))
    }
}

/// Report layout. `Full` writes the absolute path, an uppercase digest column and split date/time
/// columns; `Simple` writes the path relative to the scan root and one combined date-time column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputMode {
    #[default]
    Full,
    Simple,
}

/// The single digest used for every file in a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    #[default]
    Sha1,
    Blake3,
}

impl DigestAlgorithm {
    /// Short algorithm name, used as the digest column in simple reports.
    pub fn name(self) -> &'static str {
        match self {
            DigestAlgorithm::Sha1 => "sha1",
            DigestAlgorithm::Blake3 => "blake3",
        }
    }

    /// Column label used in full reports (the uppercase column appends `-uc`).
    pub fn column(self) -> &'static str {
        match self {
            DigestAlgorithm::Sha1 => "sha-1",
            DigestAlgorithm::Blake3 => "blake3",
        }
    }

    /// Native compression block size in bytes. Reads are sized as a multiple of this.
    pub fn block_size(self) -> usize {
        match self {
            DigestAlgorithm::Sha1 => 64,
            DigestAlgorithm::Blake3 => blake3::BLOCK_LEN,
        }
    }
}

/// One output row: everything known about a single enumerated file.
///
/// `digest` and `hash_error` are both plain strings; an empty string means "not set".
#[derive(Clone, Debug, PartialEq)]
pub struct FileRecord {
    pub case_label: String,
    /// Absolute path of the file.
    pub path: PathBuf,
    /// Path relative to the scan root. Only computed in [`OutputMode::Simple`]; `None` when the
    /// file is the root itself or lies outside it.
    pub relative_path: Option<PathBuf>,
    /// Lowercase hex digest, empty when hashing was skipped or failed.
    pub digest: String,
    pub hash_error: String,
    /// Size in bytes; `None` when the size could not be read.
    pub size: Option<u64>,
    pub created: Option<DateTime<Local>>,
    pub modified: Option<DateTime<Local>>,
    pub file_name: String,
    /// Extension with its leading dot (`.txt`), empty when the name has none.
    pub file_extension: String,
}

impl FileRecord {
    /// Uppercase form of the digest for full reports.
    pub fn digest_upper(&self) -> String {
        self.digest.to_uppercase()
    }

    /// Record `message` unless an earlier step already set the error field.
    pub(crate) fn note_error(&mut self, message: String) {
        if self.hash_error.is_empty() {
            self.hash_error = message;
        }
    }
}

/// Everything one run needs. Built once (defaults, then `hashsweep.toml`, then CLI) and shared
/// read-only with every worker.
#[derive(Clone, Debug)]
pub struct RunConfig {
    /// Directory or single file to hash.
    pub scan_root: PathBuf,
    /// CSV report destination.
    pub report: PathBuf,
    pub case_label: String,
    pub output_mode: OutputMode,
    /// Files larger than this (bytes) are not hashed; the record carries a skip notice instead.
    pub max_hash_size: u64,
    /// Stop after the first N regular files (sampling / testing aid).
    pub first_n: Option<usize>,
    /// Worker count. When None, available parallelism minus one (minimum 1).
    pub workers: Option<usize>,
    pub algorithm: DigestAlgorithm,
    /// Walk directories with jwalk (parallel) instead of walkdir (serial).
    pub parallel_walk: bool,
    /// Follow symbolic links during the walk.
    pub follow_links: bool,
    /// Debug logging and a progress counter.
    pub verbose: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            scan_root: PathBuf::from("."),
            report: PackagePaths::get().default_report_path(),
            case_label: DEFAULT_CASE_LABEL.to_string(),
            output_mode: OutputMode::default(),
            max_hash_size: DEFAULT_MAX_HASH_SIZE,
            first_n: None,
            workers: None,
            algorithm: DigestAlgorithm::default(),
            parallel_walk: false,
            follow_links: false,
            verbose: false,
        }
    }
}

/// Counts for one finished run. Returned by the pipeline instead of being accumulated globally.
#[derive(Clone, Debug, Default)]
pub struct RunSummary {
    /// Regular files yielded by the enumerator (and dispatched to workers).
    pub enumerated: usize,
    /// Records handed to the sink.
    pub written: usize,
    /// Files whose worker crashed; these have no row in the report.
    pub dropped: usize,
    /// Walk entries that could not be read, with the walk error message.
    pub skipped: Vec<(PathBuf, String)>,
}
