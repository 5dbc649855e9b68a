//! Response classification for catalog listings.
//!
//! Both catalog queries and the existence probe share one rule: 2xx carries a
//! listing, 404 means the version/arch or content set does not exist, anything
//! else is an error.

use super::Response;
use crate::error::{excerpt, Error, Result};

/// `Ok(Some(resp))` for 2xx, `Ok(None)` for 404, `Err(Http)` otherwise.
pub fn classify_listing(url: &str, resp: Response) -> Result<Option<Response>> {
    match resp.status {
        200..=299 => Ok(Some(resp)),
        404 => Ok(None),
        status => Err(Error::Http {
            method: "GET",
            url: url.to_string(),
            status,
            body: excerpt(&resp.body),
        }),
    }
}
