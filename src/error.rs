//! Error taxonomy for a hashing run.
//!
//! Only [`HashError::LocationNotFound`] aborts a run. Every other variant is captured per file
//! into the record's `hash-error` field.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HashError {
    /// The scan root does not exist (or cannot be resolved). Fatal: raised before any output is produced.
    #[error("location to hash is not found: {}", path.display())]
    LocationNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A single metadata accessor (size, created, modified) failed for one file.
    #[error("{what} unavailable: {source}: on file: {}", path.display())]
    MetadataUnavailable {
        what: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file could not be opened or read while hashing.
    #[error("{source}: on file: {}", path.display())]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl HashError {
    /// True for the one condition that must stop the run.
    pub fn is_fatal(&self) -> bool {
        matches!(self, HashError::LocationNotFound { .. })
    }
}
