//! Turn one enumerated file into one [`FileRecord`]. Never fails: every problem lands in
//! the record's `hash_error` field.

use log::debug;
use std::path::Path;

use super::hashing::digest_file;
use super::probe::FileProbe;
use super::tools::relativize;
use crate::{FileRecord, OutputMode, RunConfig, ScanRoot};

pub const ZERO_BYTES_MESSAGE: &str = "file size is 0 bytes";

pub fn size_skip_message(size: u64, max_hash_size: u64) -> String {
    format!("file size, {size} > {max_hash_size}, hash skipped")
}

/// Probe, hash and describe `file`.
///
/// Order matters: size-skip check, then the hash attempt, then the zero-byte notice, which
/// replaces whatever error text the first two steps left (an empty file still gets the
/// empty-input digest).
pub fn assemble(file: &Path, root: &ScanRoot, cfg: &RunConfig) -> FileRecord {
    let probe = FileProbe::new(file);
    let mut record = FileRecord {
        case_label: cfg.case_label.clone(),
        path: file.to_path_buf(),
        relative_path: None,
        digest: String::new(),
        hash_error: String::new(),
        size: None,
        created: None,
        modified: None,
        file_name: probe.name(),
        file_extension: probe.extension(),
    };

    match probe.size() {
        Ok(size) => {
            record.size = Some(size);
            if size > cfg.max_hash_size {
                record.hash_error = size_skip_message(size, cfg.max_hash_size);
                debug!(
                    "big file: {}: size: {} > {}",
                    file.display(),
                    size,
                    cfg.max_hash_size
                );
            } else {
                match digest_file(file, cfg.algorithm) {
                    Ok(digest) => record.digest = digest,
                    Err(e) => record.hash_error = e.to_string(),
                }
            }
            if size == 0 {
                record.hash_error = ZERO_BYTES_MESSAGE.to_string();
                debug!("zero bytes file: {}", file.display());
            }
        }
        Err(e) => record.hash_error = e.to_string(),
    }

    match probe.created() {
        Ok(t) => record.created = Some(t),
        Err(e) => record.note_error(e.to_string()),
    }
    match probe.modified() {
        Ok(t) => record.modified = Some(t),
        Err(e) => record.note_error(e.to_string()),
    }

    if cfg.output_mode == OutputMode::Simple {
        record.relative_path = relativize(file, root.path());
    }

    record
}
