//! Offline token -> bearer token exchange (OAuth refresh-token grant).

use crate::client::Client;
use crate::error::{excerpt, Error, Result};
use crate::http;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

impl Client {
    /// Bearer token for API calls. The first call performs the exchange; later
    /// calls return the cached token without checking expiry. Failures are not
    /// retried and are fatal for everything that needs the API.
    pub fn access_token(&mut self) -> Result<&str> {
        if self.access_token.is_none() {
            let token = self.exchange_offline_token()?;
            self.access_token = Some(token);
        }
        Ok(self.access_token.as_deref().unwrap_or_default())
    }

    /// Drops the cached bearer token; the next API call exchanges again.
    pub fn invalidate_token(&mut self) {
        self.access_token = None;
    }

    fn exchange_offline_token(&self) -> Result<String> {
        let url = self.config.token_url.as_str();
        tracing::debug!(url, client_id = %self.config.client_id, "exchanging offline token");
        let resp = http::post_form(
            url,
            &[
                ("grant_type", "refresh_token"),
                ("client_id", self.config.client_id.as_str()),
                ("refresh_token", self.offline_token.as_str()),
            ],
            self.config.timeouts.token(),
        )?;
        if !resp.is_success() {
            return Err(Error::Http {
                method: "POST",
                url: url.to_string(),
                status: resp.status,
                body: excerpt(&resp.body),
            });
        }
        let parsed: TokenResponse = serde_json::from_slice(&resp.body)
            .map_err(|_| Error::malformed("token", &resp.body))?;
        match parsed.access_token {
            Some(token) if !token.is_empty() => {
                tracing::info!("obtained access token");
                Ok(token)
            }
            _ => Err(Error::malformed("token", &resp.body)),
        }
    }
}
