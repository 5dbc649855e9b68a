//! Header line helpers shared by buffered requests and the download stream.

/// Value of header `name` if `line` is that header (case-insensitive name).
pub(crate) fn header_value<'a>(line: &'a str, name: &str) -> Option<&'a str> {
    let (key, value) = line.split_once(':')?;
    if key.trim().eq_ignore_ascii_case(name) {
        Some(value.trim())
    } else {
        None
    }
}

/// Status code if `line` is an HTTP status line (`HTTP/1.1 307 Temporary Redirect`).
pub(crate) fn status_code(line: &str) -> Option<u32> {
    let mut parts = line.split_whitespace();
    let proto = parts.next()?;
    if !proto.starts_with("HTTP/") {
        return None;
    }
    parts.next()?.parse().ok()
}

/// Parsed `Content-Length` if `line` carries one.
pub(crate) fn content_length(line: &str) -> Option<u64> {
    header_value(line, "content-length")?.parse().ok()
}
