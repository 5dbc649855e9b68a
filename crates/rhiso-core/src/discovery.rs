//! Version discovery.
//!
//! The catalog has no "list versions" endpoint, so published releases are
//! inferred by probing listings: first a baseline table of known releases,
//! then newer majors, then newer minors of the baseline majors. Each probe
//! sequence stops at the first missing version.

use crate::catalog::parse_listing;
use crate::client::Client;
use crate::error::Result;
use crate::http;
use crate::version::{sort_newest_first, Release, Version};

impl Client {
    /// True only for HTTP 200 with at least one image-extension file. Every
    /// other outcome, including transport errors and timeouts, is false.
    pub fn version_exists(&mut self, version: &str, arch: &str) -> bool {
        let token = match self.access_token() {
            Ok(t) => t.to_string(),
            Err(e) => {
                tracing::warn!(version, arch, "probe skipped, no access token: {}", e);
                return false;
            }
        };
        let url = match self.api_url(&["images", "rhel", version, arch]) {
            Ok(u) => u.to_string(),
            Err(e) => {
                tracing::warn!(version, arch, "probe skipped: {}", e);
                return false;
            }
        };

        let resp = match http::get(&url, Some(&token), self.config.timeouts.probe())
            .and_then(|r| http::classify_listing(&url, r))
        {
            Ok(Some(resp)) if resp.status == 200 => resp,
            Ok(_) => return false,
            Err(e) => {
                tracing::debug!(version, arch, "probe failed: {}", e);
                return false;
            }
        };

        let extension = &self.config.discovery.image_extension;
        let exists = parse_listing(&resp)
            .map(|records| records.iter().any(|r| r.has_extension(extension)))
            .unwrap_or(false);
        tracing::debug!(version, arch, exists, "probed");
        exists
    }

    /// Published releases for `arch`, newest first. The first call probes the
    /// API; later calls for the same arch return the cached list.
    pub fn discover_versions(&mut self, arch: &str) -> Result<Vec<Release>> {
        if let Some(cached) = self.discovered.get(arch) {
            return Ok(cached.clone());
        }

        // Authentication failures must stay fatal instead of reading as "no versions".
        self.access_token()?;

        let plan = self.config.discovery.clone();
        let mut found: Vec<Release> = Vec::new();

        for entry in &plan.baseline {
            for &minor in &entry.minors {
                let v = Version::new(entry.major, minor);
                if self.probe(v, arch) {
                    found.push(Release::new(v, arch));
                }
            }
        }

        if let Some(top) = plan.baseline.iter().map(|b| b.major).max() {
            for major in (top + 1)..=top.saturating_add(plan.max_new_majors) {
                let first = Version::new(major, 0);
                if !self.probe(first, arch) {
                    break;
                }
                found.push(Release::new(first, arch));
                for minor in 1..=plan.max_new_minor {
                    let v = Version::new(major, minor);
                    if !self.probe(v, arch) {
                        break;
                    }
                    found.push(Release::new(v, arch));
                }
            }
        }

        for entry in &plan.baseline {
            let start = entry.minors.iter().max().map_or(0, |m| m + 1);
            for minor in start..start.saturating_add(plan.minor_lookahead) {
                let v = Version::new(entry.major, minor);
                if !self.probe(v, arch) {
                    break;
                }
                found.push(Release::new(v, arch));
            }
        }

        sort_newest_first(&mut found);
        found.dedup();
        tracing::info!(
            arch,
            releases = %found.iter().map(|r| r.version.to_string()).collect::<Vec<_>>().join(","),
            "discovered releases"
        );
        self.discovered.insert(arch.to_string(), found.clone());
        Ok(found)
    }

    fn probe(&mut self, version: Version, arch: &str) -> bool {
        self.version_exists(&version.to_string(), arch)
    }
}
