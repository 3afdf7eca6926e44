//! Application configuration constants.
//! Defaults, tuning and thresholds in one place.

use std::path::PathBuf;
use std::sync::OnceLock;

// ---- Package / paths (from CARGO_PKG_NAME, cached) ----

/// Package-derived file names: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    pkg_name: &'static str,
    report_filename: String,
    settings_filename: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache names from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                pkg_name: pkg,
                report_filename: "hash_report.csv".to_string(),
                settings_filename: format!("{pkg}.toml"),
            }
        })
    }

    pub fn pkg_name(&self) -> &str {
        self.pkg_name
    }

    pub fn report_filename(&self) -> &str {
        &self.report_filename
    }

    /// Settings file looked up in the working directory (CLI only).
    pub fn settings_filename(&self) -> &str {
        &self.settings_filename
    }

    /// Default report location: `hash_report.csv` in the current working directory.
    pub fn default_report_path(&self) -> PathBuf {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(self.report_filename())
    }
}

// ---- Sizes ----

pub const A_KB: u64 = 1024;
pub const A_MB: u64 = A_KB * A_KB;
pub const A_GB: u64 = A_MB * A_KB;

/// Files above this size are not hashed unless the threshold is raised (bytes). 1 GiB.
pub const DEFAULT_MAX_HASH_SIZE: u64 = A_GB;

pub const DEFAULT_CASE_LABEL: &str = "no-case";

// ---- Worker threads ----

/// Worker pool sizing. Use [`WorkerThreadLimits::current()`] to fill `all_threads` from rayon.
#[derive(Clone, Copy, Debug)]
pub struct WorkerThreadLimits {
    /// Available threads (from rayon); set by [`WorkerThreadLimits::current()`].
    pub all_threads: usize,
    /// Threads left to the orchestrating thread and the OS.
    pub reserved: usize,
    /// Minimum worker count.
    pub floor: usize,
}

impl Default for WorkerThreadLimits {
    fn default() -> Self {
        Self {
            all_threads: 0, // use current() to set from rayon
            reserved: Self::RESERVED_THREADS,
            floor: Self::FLOOR_THREADS,
        }
    }
}

impl WorkerThreadLimits {
    pub const RESERVED_THREADS: usize = 1;
    pub const FLOOR_THREADS: usize = 1;

    /// Build limits with `all_threads` set from `rayon::current_num_threads()`.
    pub fn current() -> Self {
        Self {
            all_threads: rayon::current_num_threads(),
            ..Self::default()
        }
    }

    /// Default worker count: all threads minus the reserved ones, never below the floor.
    pub fn default_workers(&self) -> usize {
        self.all_threads
            .saturating_sub(self.reserved)
            .max(self.floor)
    }
}

// ---- Hashing ----

/// Hashing buffer sizes.
pub struct HashingConsts;

impl HashingConsts {
    /// Algorithm blocks per read. With 64-byte blocks this is a 1 MiB read.
    pub const BLOCKS_PER_READ: usize = 16 * 1024;
}

// ---- Streaming channel cap ----

/// Capacity of the path and result channels. The walk blocks once this many paths are queued
/// ahead of the workers, and workers block once this many results wait for the sink.
pub const STREAMING_CHANNEL_CAP: usize = 10_000;

// ---- Progress ----

pub struct ProgressConsts;

impl ProgressConsts {
    /// Records written between progress counter updates.
    pub const UPDATE_BATCH_SIZE: usize = 100;
}
