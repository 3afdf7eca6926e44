//! File hashing utilities

use sha1::{Digest, Sha1};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::DigestAlgorithm;
use crate::error::HashError;
use crate::utils::config::HashingConsts;

/// Incremental digest state for the run's algorithm.
enum DigestState {
    Sha1(Sha1),
    Blake3(Box<blake3::Hasher>),
}

impl DigestState {
    fn new(algorithm: DigestAlgorithm) -> Self {
        match algorithm {
            DigestAlgorithm::Sha1 => DigestState::Sha1(Sha1::new()),
            DigestAlgorithm::Blake3 => DigestState::Blake3(Box::new(blake3::Hasher::new())),
        }
    }

    fn update(&mut self, data: &[u8]) {
        match self {
            DigestState::Sha1(h) => h.update(data),
            DigestState::Blake3(h) => {
                h.update(data);
            }
        }
    }

    fn finalize_hex(self) -> String {
        match self {
            DigestState::Sha1(h) => hex::encode(h.finalize()),
            DigestState::Blake3(h) => h.finalize().to_hex().to_string(),
        }
    }
}

/// Read size for `algorithm`: a whole number of its native blocks.
pub fn read_size(algorithm: DigestAlgorithm) -> usize {
    algorithm.block_size() * HashingConsts::BLOCKS_PER_READ
}

/// Hash a file and return the lowercase hex digest, streaming it in block-aligned reads.
///
/// A file that shrinks or disappears mid-read ends in a short digest or a
/// [`HashError::FileUnreadable`], never in a signal.
pub fn digest_file(path: &Path, algorithm: DigestAlgorithm) -> Result<String, HashError> {
    let unreadable = |source: io::Error| HashError::FileUnreadable {
        path: path.to_path_buf(),
        source,
    };
    let mut file = File::open(path).map_err(unreadable)?;
    let mut state = DigestState::new(algorithm);
    let mut buffer = vec![0u8; read_size(algorithm)];
    loop {
        let n = match file.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(unreadable(e)),
        };
        state.update(&buffer[..n]);
    }

    Ok(state.finalize_hex())
}

/// Digest of an in-memory buffer (reference values in tests, empty-input digests).
pub fn digest_bytes(data: &[u8], algorithm: DigestAlgorithm) -> String {
    let mut state = DigestState::new(algorithm);
    state.update(data);
    state.finalize_hex()
}
