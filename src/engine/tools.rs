//! Path classification and relative-path utilities

use log::{debug, info, warn};
use std::path::{Path, PathBuf};

use crate::ScanRoot;
use crate::error::HashError;

/// Resolve `path` to an absolute, existence-checked [`ScanRoot`].
///
/// Fails with [`HashError::LocationNotFound`] when the path cannot be resolved. A regular file
/// (or a link to one) classifies as `SingleFile`; everything else as `Directory`.
pub fn classify_root(path: &Path) -> Result<ScanRoot, HashError> {
    let abs = path
        .canonicalize()
        .map_err(|source| HashError::LocationNotFound {
            path: path.to_path_buf(),
            source,
        })?;
    if abs.is_file() {
        info!("Scan location is a file: {}", abs.display());
        Ok(ScanRoot::SingleFile(abs))
    } else {
        info!("Scan location is a folder: {}", abs.display());
        Ok(ScanRoot::Directory(abs))
    }
}

/// Path of `file` relative to `root`: the parent directory relative to the root, joined with
/// the file name.
///
/// Returns `None` when `file` is the root itself, and `None` plus a warning when `file` does not
/// lie under `root`.
pub fn relativize(file: &Path, root: &Path) -> Option<PathBuf> {
    if file == root {
        return None;
    }
    let (Some(parent), Some(name)) = (file.parent(), file.file_name()) else {
        warn!("no parent or file name - {} - {}", file.display(), root.display());
        return None;
    };
    match parent.strip_prefix(root) {
        Ok(rel) => Some(rel.join(name)),
        Err(_) => {
            warn!(
                "{} is not in the subpath of {} - {} - {}",
                parent.display(),
                root.display(),
                file.display(),
                root.display()
            );
            None
        }
    }
}

/// Portable form of a relative path for reports: forward slashes on every platform.
/// Names that are not valid UTF-8 get replacement characters, and the loss is logged.
pub fn path_to_report_string(path: &Path) -> String {
    if path.to_str().is_none() {
        debug!("path is not valid UTF-8, written lossily: {}", path.display());
    }
    path.to_string_lossy().replace('\\', "/")
}

/// True if the walk should hand `path` to the workers (i.e. it is not one of our own outputs).
pub fn should_include_in_walk(path: &Path, excluded: &[PathBuf]) -> bool {
    if excluded.iter().any(|e| e.as_path() == path) {
        debug!("excluding own output from walk: {}", path.display());
        return false;
    }
    true
}
