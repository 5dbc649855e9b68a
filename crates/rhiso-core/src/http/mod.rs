//! Blocking HTTP plumbing on top of libcurl.
//!
//! One `Easy` handle per request, headers collected through
//! `header_function`, body buffered in memory. Only small JSON responses go
//! through here; the image stream has its own path in `download::stream`.

mod classify;
mod parse;

pub use classify::classify_listing;
pub(crate) use parse::{content_length, header_value, status_code};

use crate::error::{Error, Result};
use std::str;
use std::time::Duration;

/// Upper bound on the connect phase regardless of the per-call timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);

/// Buffered response of a completed request.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u32,
    /// Raw header lines of the final response, status line included.
    pub headers: Vec<String>,
    pub body: Vec<u8>,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.status)
    }

    /// First value of `name` (case-insensitive) in the final response.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter().find_map(|line| header_value(line, name))
    }
}

/// GET `url` without following redirects, optionally with a bearer token.
pub fn get(url: &str, bearer: Option<&str>, timeout: Duration) -> Result<Response> {
    let mut easy = curl::easy::Easy::new();
    easy.get(true).map_err(|e| Error::transport(url, e))?;
    perform(easy, url, bearer, timeout)
}

/// POST an `application/x-www-form-urlencoded` body.
pub fn post_form(url: &str, form: &[(&str, &str)], timeout: Duration) -> Result<Response> {
    let body = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(form)
        .finish();
    let mut easy = curl::easy::Easy::new();
    easy.post(true).map_err(|e| Error::transport(url, e))?;
    easy.post_fields_copy(body.as_bytes())
        .map_err(|e| Error::transport(url, e))?;
    perform(easy, url, None, timeout)
}

fn perform(
    mut easy: curl::easy::Easy,
    url: &str,
    bearer: Option<&str>,
    timeout: Duration,
) -> Result<Response> {
    let tx = |e: curl::Error| Error::transport(url, e);

    easy.url(url).map_err(tx)?;
    easy.follow_location(false).map_err(tx)?;
    easy.connect_timeout(timeout.min(CONNECT_TIMEOUT)).map_err(tx)?;
    easy.timeout(timeout).map_err(tx)?;

    let mut list = curl::easy::List::new();
    list.append("Accept: application/json").map_err(tx)?;
    if let Some(token) = bearer {
        list.append(&format!("Authorization: Bearer {}", token))
            .map_err(tx)?;
    }
    easy.http_headers(list).map_err(tx)?;

    let mut headers: Vec<String> = Vec::new();
    let mut body: Vec<u8> = Vec::new();
    {
        let mut transfer = easy.transfer();
        transfer
            .header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    let line = s.trim_end();
                    // A new status line starts a new response (e.g. after 100 Continue).
                    if status_code(line).is_some() {
                        headers.clear();
                    }
                    if !line.is_empty() {
                        headers.push(line.to_string());
                    }
                }
                true
            })
            .map_err(tx)?;
        transfer
            .write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })
            .map_err(tx)?;
        transfer.perform().map_err(tx)?;
    }

    let status = easy.response_code().map_err(tx)?;
    tracing::debug!(url, status, bytes = body.len(), "http response");
    Ok(Response {
        status,
        headers,
        body,
    })
}
