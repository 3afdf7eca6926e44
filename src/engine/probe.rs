//! Read-only metadata extraction for a single file.

use chrono::{DateTime, Local};
use std::fs::Metadata;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::HashError;

/// Metadata for one file, read with a single `stat`. Each accessor fails on its own with
/// [`HashError::MetadataUnavailable`], so a missing creation time never costs the size.
pub struct FileProbe {
    path: PathBuf,
    meta: io::Result<Metadata>,
}

impl FileProbe {
    pub fn new(path: &Path) -> Self {
        FileProbe {
            path: path.to_path_buf(),
            meta: std::fs::metadata(path),
        }
    }

    pub fn size(&self) -> Result<u64, HashError> {
        Ok(self.metadata("size")?.len())
    }

    /// Creation time. Where the filesystem has no birth time this falls back to the inode
    /// change time on Unix.
    pub fn created(&self) -> Result<DateTime<Local>, HashError> {
        let meta = self.metadata("created")?;
        meta.created()
            .or_else(|_| change_time(meta))
            .map(DateTime::<Local>::from)
            .map_err(|e| self.unavailable("created", e))
    }

    pub fn modified(&self) -> Result<DateTime<Local>, HashError> {
        let meta = self.metadata("modified")?;
        meta.modified()
            .map(DateTime::<Local>::from)
            .map_err(|e| self.unavailable("modified", e))
    }

    pub fn name(&self) -> String {
        file_name(&self.path)
    }

    pub fn extension(&self) -> String {
        file_extension(&self.path)
    }

    fn metadata(&self, what: &'static str) -> Result<&Metadata, HashError> {
        self.meta.as_ref().map_err(|e| {
            // io::Error is not Clone; rebuild one per accessor.
            self.unavailable(what, io::Error::new(e.kind(), e.to_string()))
        })
    }

    fn unavailable(&self, what: &'static str, source: io::Error) -> HashError {
        HashError::MetadataUnavailable {
            what,
            path: self.path.clone(),
            source,
        }
    }
}

/// Base name of `path` (lossy for non-UTF-8 names), empty if there is none.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Final extension with its leading dot (`archive.tar.gz` -> `.gz`), empty when there is none.
/// Dotfiles such as `.bashrc` have no extension.
pub fn file_extension(path: &Path) -> String {
    path.extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default()
}

#[cfg(unix)]
fn change_time(meta: &Metadata) -> io::Result<SystemTime> {
    use std::os::unix::fs::MetadataExt;
    use std::time::{Duration, UNIX_EPOCH};
    let secs = u64::try_from(meta.ctime())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "ctime before epoch"))?;
    let nanos = u32::try_from(meta.ctime_nsec()).unwrap_or(0);
    Ok(UNIX_EPOCH + Duration::new(secs, nanos))
}

#[cfg(not(unix))]
fn change_time(_meta: &Metadata) -> io::Result<SystemTime> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "creation time not supported on this platform",
    ))
}
