//! Process-scoped API client.
//!
//! Holds the two pieces of mutable state a run has: the bearer token and the
//! per-architecture discovery cache. Neither is persisted or shared across
//! threads, so operations take `&mut self` and need no locking.

use crate::config::RhisoConfig;
use crate::error::{Error, Result};
use crate::version::Release;
use std::collections::HashMap;
use url::Url;

pub struct Client {
    pub(crate) config: RhisoConfig,
    pub(crate) offline_token: String,
    /// Bearer token from the first successful exchange.
    pub(crate) access_token: Option<String>,
    /// arch -> releases newest first; filled once per arch.
    pub(crate) discovered: HashMap<String, Vec<Release>>,
}

impl Client {
    pub fn new(config: RhisoConfig, offline_token: impl Into<String>) -> Self {
        Self {
            config,
            offline_token: offline_token.into(),
            access_token: None,
            discovered: HashMap::new(),
        }
    }

    pub fn config(&self) -> &RhisoConfig {
        &self.config
    }

    /// `{api_base}/seg/seg/...` with each segment percent-encoded.
    pub(crate) fn api_url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.config.api_base)
            .map_err(|e| Error::Config(format!("api_base {:?}: {}", self.config.api_base, e)))?;
        url.path_segments_mut()
            .map_err(|_| {
                Error::Config(format!(
                    "api_base {:?} cannot take a path",
                    self.config.api_base
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}
