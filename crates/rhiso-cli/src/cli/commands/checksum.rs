//! Checksum command: SHA-256 of a local file, optionally verified.

use anyhow::Result;
use rhiso_core::{checksum, Error};
use serde_json::json;
use std::path::Path;

use crate::cli::output::print_json;

/// Compute and print SHA-256 of `path`. With `expect`, a mismatch is an
/// error; unlike a download, the file is left alone.
pub fn run_checksum(path: &Path, expect: Option<&str>, chunk_bytes: usize, json: bool) -> Result<()> {
    let digest = checksum::sha256_path_chunked(path, chunk_bytes.max(1))?;

    if let Some(expected) = expect {
        if !checksum::digests_match(expected, &digest) {
            return Err(Error::ChecksumMismatch {
                expected: expected.trim().to_string(),
                computed: digest,
                path: path.to_path_buf(),
            }
            .into());
        }
    }

    if json {
        print_json(&json!({
            "path": path.display().to_string(),
            "sha256": digest,
            "verified": expect.is_some(),
        }))?;
    } else {
        println!("{}  {}", digest, path.display());
    }
    Ok(())
}
