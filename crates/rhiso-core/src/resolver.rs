//! Find an image by its exact filename across discovered releases.

use crate::catalog::ImageRecord;
use crate::client::Client;
use crate::error::Result;
use crate::progress::Reporter;

impl Client {
    /// Searches the primary then the secondary architecture, newest release
    /// first, and stops at the first release that has a match. Within that
    /// release the record with the greatest `datePublished` wins.
    ///
    /// Matches in older releases are never compared against the first hit.
    pub fn find_by_filename(
        &mut self,
        filename: &str,
        reporter: &dyn Reporter,
    ) -> Result<Option<ImageRecord>> {
        reporter.on_message(&format!("Searching for filename: {}", filename));
        reporter.on_message("This may take a moment as we search across multiple RHEL versions...");

        let primary = self.config.discovery.primary_arch.clone();
        let secondary = self.config.discovery.secondary_arch.clone();
        let mut releases = self.discover_versions(&primary)?;
        releases.extend(self.discover_versions(&secondary)?);

        for release in &releases {
            let images = self.list_images(&release.version.to_string(), &release.arch)?;
            let matches: Vec<ImageRecord> =
                images.into_iter().filter(|img| img.is_named(filename)).collect();
            if matches.is_empty() {
                reporter.on_message(&format!("  Searching {}... -", release));
                continue;
            }
            reporter.on_message(&format!("  Searching {}... found", release));
            let count = matches.len();
            let picked = most_recent(matches);
            if count > 1 {
                if let Some(img) = &picked {
                    reporter.on_message(&format!(
                        "Found {} matches. Selected {} (published {})",
                        count,
                        img.image_name.as_deref().unwrap_or("N/A"),
                        img.date_published.as_deref().unwrap_or("N/A"),
                    ));
                }
            }
            tracing::debug!(filename, release = %release, count, "filename resolved");
            return Ok(picked);
        }

        reporter.on_message(&format!("No image found with filename: {}", filename));
        Ok(None)
    }
}

/// Record with the lexicographically greatest `datePublished`; records
/// without a date lose to any dated one. Ties keep the catalog order.
pub fn most_recent(mut matches: Vec<ImageRecord>) -> Option<ImageRecord> {
    matches.sort_by(|a, b| b.date_published.cmp(&a.date_published));
    matches.into_iter().next()
}
