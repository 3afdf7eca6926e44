//! Hashsweep: recursively hash every file under a scan root in parallel and report one row per file.

pub mod engine;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use error::HashError;
pub use report::{hash_report, hash_report_with_summary};
pub use types::*;

/// Result alias used by the public hashsweep API
pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;
