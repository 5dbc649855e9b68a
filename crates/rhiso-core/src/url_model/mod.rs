//! Local filenames for downloaded images.
//!
//! The filename comes from the download-info response (or, failing that, the
//! signed URL's last path segment) and is untrusted: it is sanitized before
//! being joined to the output directory.

mod path;
mod sanitize;

pub use path::filename_from_url_path;
pub use sanitize::sanitize_filename;

/// Sanitized filename safe to join to an output directory, or None if
/// nothing usable remains.
pub fn local_filename(remote: &str) -> Option<String> {
    let sanitized = sanitize_filename(remote);
    if sanitized.is_empty() || sanitized == "." || sanitized == ".." {
        None
    } else {
        Some(sanitized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_iso_name_unchanged() {
        assert_eq!(
            local_filename("rhel-9.6-x86_64-boot.iso").as_deref(),
            Some("rhel-9.6-x86_64-boot.iso")
        );
    }

    #[test]
    fn traversal_is_flattened() {
        assert_eq!(
            local_filename("../../etc/passwd").as_deref(),
            Some("_.._etc_passwd")
        );
    }

    #[test]
    fn nothing_usable() {
        assert_eq!(local_filename(""), None);
        assert_eq!(local_filename(".."), None);
        assert_eq!(local_filename(" . "), None);
    }
}
