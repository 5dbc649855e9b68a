//! SHA-256 verification of downloaded images.
//!
//! Hashing reads the file back in fixed-size chunks after the transfer; the
//! image is never held in memory.

use crate::error::{Error, Result};
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

pub const DEFAULT_CHUNK_BYTES: usize = 64 * 1024;

/// SHA-256 of a file as lowercase hex, read `chunk_bytes` at a time.
pub fn sha256_path_chunked(path: &Path, chunk_bytes: usize) -> Result<String> {
    let mut f = File::open(path).map_err(|e| Error::io(format!("open {}", path.display()), e))?;
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; chunk_bytes.max(1)];
    loop {
        let n = f
            .read(&mut buf)
            .map_err(|e| Error::io(format!("read {}", path.display()), e))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// True when two hex digests are equal ignoring case and surrounding whitespace.
pub fn digests_match(expected: &str, computed: &str) -> bool {
    expected.trim().eq_ignore_ascii_case(computed.trim())
}

/// Hashes `path` and compares with `expected`. On mismatch the file is
/// deleted and `ChecksumMismatch` returned. Returns the computed digest.
pub fn verify_or_remove(path: &Path, expected: &str, chunk_bytes: usize) -> Result<String> {
    let computed = sha256_path_chunked(path, chunk_bytes)?;
    if digests_match(expected, &computed) {
        return Ok(computed);
    }
    tracing::warn!(
        path = %path.display(),
        expected,
        computed = %computed,
        "checksum mismatch, removing file"
    );
    fs::remove_file(path).map_err(|e| Error::io(format!("remove {}", path.display()), e))?;
    Err(Error::ChecksumMismatch {
        expected: expected.trim().to_string(),
        computed,
        path: path.to_path_buf(),
    })
}
