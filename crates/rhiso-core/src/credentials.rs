//! Offline token file.

use crate::error::{Error, Result};
use std::fs;
use std::io;
use std::path::Path;

/// Where users generate an offline token.
pub const TOKEN_HELP_URL: &str = "https://access.redhat.com/management/api";

/// Reads the offline token from `path`, trimming surrounding whitespace.
pub fn load_offline_token(path: &Path) -> Result<String> {
    let raw = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(Error::Credentials(format!(
                "token file not found: {}; generate an offline token at {} and save it there",
                path.display(),
                TOKEN_HELP_URL
            )));
        }
        Err(e) => return Err(Error::io(format!("read {}", path.display()), e)),
    };
    let token = raw.trim();
    if token.is_empty() {
        return Err(Error::Credentials(format!(
            "token file is empty: {}",
            path.display()
        )));
    }
    Ok(token.to_string())
}
