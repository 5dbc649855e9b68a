//! Download executor: checksum -> signed URL -> file on disk -> verified.
//!
//! A download either ends with a file whose SHA-256 matches the catalog
//! checksum, or with an error. On mismatch the file is deleted.

mod info;
mod stream;

use crate::checksum;
use crate::client::Client;
use crate::error::{excerpt, Error, Result};
use crate::http;
use crate::progress::Reporter;
use crate::url_model;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use stream::StreamOptions;

/// Where to fetch an image and what to call it locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadInfo {
    /// Signed URL, valid for a limited time.
    pub href: String,
    pub filename: String,
}

/// A completed, verified download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadResult {
    pub filename: String,
    /// Expected digest, equal to the file's SHA-256.
    pub checksum: String,
    pub path: PathBuf,
    pub size: u64,
    pub verified: bool,
}

impl Client {
    /// Resolves `checksum` to a signed URL and filename.
    pub fn download_info(&mut self, checksum: &str) -> Result<DownloadInfo> {
        let url = self
            .api_url(&["images", checksum.trim(), "download"])?
            .to_string();
        let token = self.access_token()?.to_string();
        let resp = http::get(&url, Some(&token), self.config.timeouts.download_info())?;
        if !resp.is_success() && !resp.is_redirect() {
            return Err(Error::Http {
                method: "GET",
                url,
                status: resp.status,
                body: excerpt(&resp.body),
            });
        }
        info::parse_download_info(&resp)
    }

    /// Downloads an image into `output_dir` and verifies it.
    ///
    /// `identifier` is a SHA-256 checksum, or an exact filename when
    /// `by_filename` is set (resolved through discovery first).
    pub fn download(
        &mut self,
        identifier: &str,
        output_dir: &Path,
        by_filename: bool,
        reporter: &dyn Reporter,
    ) -> Result<DownloadResult> {
        let checksum = if by_filename {
            let image = self
                .find_by_filename(identifier, reporter)?
                .ok_or_else(|| Error::FileNotFound(identifier.to_string()))?;
            let checksum = image
                .checksum
                .filter(|c| !c.trim().is_empty())
                .ok_or_else(|| Error::MissingChecksum(identifier.to_string()))?;
            reporter.on_message(&format!("Using checksum: {}", checksum));
            checksum
        } else {
            identifier.trim().to_string()
        };

        reporter.on_message(&format!(
            "Fetching download information for checksum: {}",
            checksum
        ));
        let info = self.download_info(&checksum)?;
        let filename = url_model::local_filename(&info.filename).ok_or_else(|| Error::Malformed {
            what: "download info",
            raw: format!("unusable filename {:?}", info.filename),
        })?;

        fs::create_dir_all(output_dir)
            .map_err(|e| Error::io(format!("create {}", output_dir.display()), e))?;
        let path = output_dir.join(&filename);

        reporter.on_message(&format!("Downloading: {}", filename));
        reporter.on_message(&format!("Destination: {}", path.display()));

        let chunk_bytes = self.config.download.chunk_bytes.max(1);
        let opts = StreamOptions {
            chunk_bytes,
            connect_timeout: Duration::from_secs(self.config.timeouts.download_connect_secs),
            stall_time: Duration::from_secs(self.config.timeouts.download_stall_secs),
        };
        let size = stream::stream_to_file(&info.href, &path, opts, reporter)?;

        reporter.on_message("Verifying checksum...");
        checksum::verify_or_remove(&path, &checksum, chunk_bytes)?;
        reporter.on_message("Checksum verified successfully!");
        tracing::info!(path = %path.display(), size, "download verified");

        Ok(DownloadResult {
            filename,
            checksum,
            path,
            size,
            verified: true,
        })
    }
}
