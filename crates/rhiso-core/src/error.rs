//! Error type shared by every client operation.
//!
//! Not-found conditions (404 listings, unknown versions) are modelled as empty
//! results by the callers and never reach this enum, except where a download
//! needs the identifier to resolve.

use std::path::PathBuf;
use thiserror::Error;

/// Longest response excerpt carried in an error message.
const RAW_EXCERPT_CHARS: usize = 500;

#[derive(Debug, Error)]
pub enum Error {
    /// libcurl failed before a response arrived (DNS, connect, timeout, reset).
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: curl::Error,
    },

    /// The server answered with a status the caller does not accept.
    #[error("{method} {url} returned HTTP {status}: {body}")]
    Http {
        method: &'static str,
        url: String,
        status: u32,
        body: String,
    },

    /// The response parsed but lacks the fields we need; `raw` echoes it.
    #[error("unexpected {what} response: {raw}")]
    Malformed { what: &'static str, raw: String },

    /// Downloaded file hash differs from the catalog checksum. The file has
    /// already been removed when this is returned.
    #[error(
        "checksum verification failed for {}: expected {expected}, got {computed}",
        .path.display()
    )]
    ChecksumMismatch {
        expected: String,
        computed: String,
        path: PathBuf,
    },

    #[error("no image found with filename: {0}")]
    FileNotFound(String),

    #[error("no checksum found for image {0}")]
    MissingChecksum(String),

    #[error("{0}")]
    Credentials(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    pub(crate) fn transport(url: &str, source: curl::Error) -> Self {
        Error::Transport {
            url: url.to_string(),
            source,
        }
    }

    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Error::Io {
            context: context.into(),
            source,
        }
    }

    pub(crate) fn malformed(what: &'static str, raw: &[u8]) -> Self {
        Error::Malformed {
            what,
            raw: excerpt(raw),
        }
    }

    /// True for timeouts reported by libcurl.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Transport { source, .. } if source.is_operation_timedout())
    }
}

/// Lossy UTF-8 excerpt of a response body for diagnostics.
pub(crate) fn excerpt(raw: &[u8]) -> String {
    let text = String::from_utf8_lossy(raw);
    let text = text.trim();
    if text.is_empty() {
        return "<empty body>".to_string();
    }
    match text.char_indices().nth(RAW_EXCERPT_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
