//! Single-stream GET of the signed image URL straight to disk.
//!
//! The body is written as it arrives, in chunks of at most `chunk_bytes`,
//! and progress is reported after each chunk. The file is created only once
//! a 2xx response starts delivering data; error bodies are kept in memory
//! for the diagnostic instead.

use crate::error::{excerpt, Error, Result};
use crate::http::{content_length, status_code};
use crate::progress::Reporter;
use std::cell::Cell;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str;
use std::time::Duration;

const MAX_REDIRECTS: u32 = 10;
/// Bytes per second below which the transfer counts as stalled.
const LOW_SPEED_LIMIT: u32 = 1024;
const ERROR_BODY_LIMIT: usize = 4096;

#[derive(Debug, Clone, Copy)]
pub(crate) struct StreamOptions {
    pub chunk_bytes: usize,
    pub connect_timeout: Duration,
    pub stall_time: Duration,
}

/// Downloads `url` into `path` (created or truncated). Returns bytes written.
///
/// An interrupted transfer leaves whatever was written on disk.
pub(crate) fn stream_to_file(
    url: &str,
    path: &Path,
    opts: StreamOptions,
    reporter: &dyn Reporter,
) -> Result<u64> {
    let shown_url = without_query(url);
    let tx = |e: curl::Error| Error::transport(&shown_url, e);

    let mut easy = curl::easy::Easy::new();
    easy.url(url).map_err(tx)?;
    easy.follow_location(true).map_err(tx)?;
    easy.max_redirections(MAX_REDIRECTS).map_err(tx)?;
    easy.buffer_size(opts.chunk_bytes).map_err(tx)?;
    easy.connect_timeout(opts.connect_timeout).map_err(tx)?;
    easy.low_speed_limit(LOW_SPEED_LIMIT).map_err(tx)?;
    easy.low_speed_time(opts.stall_time).map_err(tx)?;

    let status = Cell::new(0u32);
    let total: Cell<Option<u64>> = Cell::new(None);
    let mut written: u64 = 0;
    let mut writer: Option<BufWriter<File>> = None;
    let mut write_err: Option<std::io::Error> = None;
    let mut error_body: Vec<u8> = Vec::new();

    let performed = {
        let mut transfer = easy.transfer();
        transfer
            .header_function(|data| {
                if let Ok(line) = str::from_utf8(data) {
                    let line = line.trim_end();
                    if let Some(code) = status_code(line) {
                        // New response in a redirect chain.
                        status.set(code);
                        total.set(None);
                    } else if let Some(len) = content_length(line) {
                        total.set(Some(len));
                    }
                }
                true
            })
            .map_err(tx)?;
        transfer
            .write_function(|data| {
                if !(200..300).contains(&status.get()) {
                    let room = ERROR_BODY_LIMIT.saturating_sub(error_body.len());
                    error_body.extend_from_slice(&data[..data.len().min(room)]);
                    return Ok(data.len());
                }
                if writer.is_none() {
                    match File::create(path) {
                        Ok(f) => writer = Some(BufWriter::with_capacity(opts.chunk_bytes, f)),
                        Err(e) => {
                            write_err = Some(e);
                            return Ok(0); // abort transfer
                        }
                    }
                }
                if let Some(w) = writer.as_mut() {
                    if let Err(e) = w.write_all(data) {
                        write_err = Some(e);
                        return Ok(0);
                    }
                }
                written += data.len() as u64;
                reporter.on_progress(written, total.get());
                Ok(data.len())
            })
            .map_err(tx)?;
        transfer.perform()
    };

    if let Some(e) = write_err {
        return Err(Error::io(format!("write {}", path.display()), e));
    }
    performed.map_err(tx)?;

    let code = easy.response_code().map_err(tx)?;
    if !(200..300).contains(&code) {
        return Err(Error::Http {
            method: "GET",
            url: shown_url.clone(),
            status: code,
            body: excerpt(&error_body),
        });
    }

    let file = match writer {
        Some(w) => w
            .into_inner()
            .map_err(|e| Error::io(format!("flush {}", path.display()), e.into_error()))?,
        // Zero-length body: nothing reached the write callback.
        None => File::create(path).map_err(|e| Error::io(format!("create {}", path.display()), e))?,
    };
    file.sync_all()
        .map_err(|e| Error::io(format!("sync {}", path.display()), e))?;

    tracing::debug!(url = %shown_url, bytes = written, "stream complete");
    Ok(written)
}

/// `url` without its query string; signed URLs carry credentials there.
fn without_query(url: &str) -> String {
    match url::Url::parse(url) {
        Ok(mut u) => {
            u.set_query(None);
            u.to_string()
        }
        Err(_) => url.split('?').next().unwrap_or(url).to_string(),
    }
}
