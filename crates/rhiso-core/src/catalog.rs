//! Image catalog queries: by version/architecture and by content set.
//!
//! A 404 from either endpoint means "no such version/arch or content set" and
//! yields an empty list. Records keep the order the service returned.

use crate::client::Client;
use crate::error::{Error, Result};
use crate::http::{self, Response};
use crate::version::Release;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::time::Duration;

/// One downloadable file as described by the catalog. Fields are copied
/// verbatim; anything not modelled here is kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageRecord {
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_string")]
    pub image_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_string")]
    pub filename: Option<String>,
    /// Hex SHA-256; also the identifier for the download-info endpoint.
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_string")]
    pub checksum: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_string")]
    pub date_published: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_string")]
    pub arch: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ImageRecord {
    pub fn has_extension(&self, extension: &str) -> bool {
        self.filename
            .as_deref()
            .is_some_and(|name| name.ends_with(extension))
    }

    pub fn is_named(&self, filename: &str) -> bool {
        self.filename.as_deref() == Some(filename)
    }
}

/// Strings as is, numbers and booleans as their text, anything else as absent.
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

#[derive(Debug, Deserialize)]
struct ImageListing {
    #[serde(default)]
    body: Vec<Value>,
}

/// Records of a listing body. Entries that are not JSON objects are skipped.
pub(crate) fn parse_listing(resp: &Response) -> Result<Vec<ImageRecord>> {
    let listing: ImageListing = serde_json::from_slice(&resp.body)
        .map_err(|_| Error::malformed("image listing", &resp.body))?;
    let mut records = Vec::with_capacity(listing.body.len());
    for entry in listing.body {
        match serde_json::from_value::<ImageRecord>(entry) {
            Ok(record) => records.push(record),
            Err(e) => tracing::warn!("skipping catalog record: {}", e),
        }
    }
    Ok(records)
}

impl Client {
    /// Images published for `version` (e.g. "9.6") on `arch` (e.g. "x86_64").
    pub fn list_images(&mut self, version: &str, arch: &str) -> Result<Vec<ImageRecord>> {
        let url = self.api_url(&["images", "rhel", version, arch])?;
        let timeout = self.config.timeouts.listing();
        self.fetch_listing(url.as_str(), timeout)
    }

    /// Images in a named content set (e.g. "rhel-9-for-x86_64-baseos-isos").
    pub fn list_images_by_content_set(&mut self, content_set: &str) -> Result<Vec<ImageRecord>> {
        let mut url = self.api_url(&["images", "cset", content_set])?;
        url.query_pairs_mut()
            .append_pair("limit", &self.config.content_set_limit.to_string());
        let timeout = self.config.timeouts.listing();
        self.fetch_listing(url.as_str(), timeout)
    }

    /// The newest `count` discovered releases for `arch`, each with its
    /// image-extension files. Releases whose listing is empty are skipped.
    pub fn latest_releases(
        &mut self,
        arch: &str,
        count: usize,
    ) -> Result<Vec<(Release, Vec<ImageRecord>)>> {
        let extension = self.config.discovery.image_extension.clone();
        let releases = self.discover_versions(arch)?;
        let mut out = Vec::new();
        for release in releases.into_iter().take(count) {
            let images = self.list_images(&release.version.to_string(), &release.arch)?;
            if images.is_empty() {
                continue;
            }
            let images = images
                .into_iter()
                .filter(|img| img.has_extension(&extension))
                .collect();
            out.push((release, images));
        }
        Ok(out)
    }

    fn fetch_listing(&mut self, url: &str, timeout: Duration) -> Result<Vec<ImageRecord>> {
        let token = self.access_token()?.to_string();
        let resp = http::get(url, Some(&token), timeout)?;
        match http::classify_listing(url, resp)? {
            Some(resp) => parse_listing(&resp),
            None => {
                tracing::debug!(url, "listing not found, treating as empty");
                Ok(Vec::new())
            }
        }
    }
}
