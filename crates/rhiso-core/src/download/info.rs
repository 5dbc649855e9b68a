//! Parsing of the download-info response.
//!
//! The endpoint answers `307 Temporary Redirect` with a JSON body
//! `{"body": {"href": ..., "filename": ...}}`. When the body is not JSON the
//! `Location` header is used and the filename taken from its path.

use super::DownloadInfo;
use crate::error::{Error, Result};
use crate::http::Response;
use crate::url_model::filename_from_url_path;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Envelope {
    body: Option<InfoBody>,
}

#[derive(Debug, Deserialize)]
struct InfoBody {
    href: Option<String>,
    filename: Option<String>,
}

/// Extracts href and filename from a 2xx or 3xx response. Other statuses are
/// rejected by the caller before this runs.
pub(crate) fn parse_download_info(resp: &Response) -> Result<DownloadInfo> {
    match serde_json::from_slice::<Envelope>(&resp.body) {
        Ok(envelope) => {
            let body = envelope
                .body
                .ok_or_else(|| Error::malformed("download info", &resp.body))?;
            match (body.href, body.filename) {
                (Some(href), Some(filename)) if !href.is_empty() && !filename.is_empty() => {
                    Ok(DownloadInfo { href, filename })
                }
                _ => Err(Error::malformed("download info", &resp.body)),
            }
        }
        Err(_) if resp.is_redirect() => from_location(resp),
        Err(_) => Err(Error::malformed("download info", &resp.body)),
    }
}

fn from_location(resp: &Response) -> Result<DownloadInfo> {
    let href = resp
        .header("location")
        .filter(|l| !l.is_empty())
        .ok_or_else(|| Error::malformed("download info", &resp.body))?;
    let filename = filename_from_url_path(href).ok_or_else(|| Error::Malformed {
        what: "download info",
        raw: format!("cannot derive a filename from Location {}", href),
    })?;
    Ok(DownloadInfo {
        href: href.to_string(),
        filename,
    })
}
