//! `rhiso list`: latest releases, one version/arch, or a content set.

use anyhow::Result;
use rhiso_core::{Client, ImageRecord, Release};
use serde_json::json;
use std::fmt::Write;

use crate::cli::output::print_json;

/// Releases shown by a bare `rhiso list`.
const LATEST_COUNT: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListTarget {
    Latest,
    Release { version: String, arch: String },
    ContentSet(String),
}

impl ListTarget {
    /// clap guarantees version and arch come together and exclude a content set.
    pub fn from_args(
        version: Option<String>,
        arch: Option<String>,
        content_set: Option<String>,
    ) -> Self {
        match (version, arch, content_set) {
            (_, _, Some(name)) => ListTarget::ContentSet(name),
            (Some(version), Some(arch), None) => ListTarget::Release { version, arch },
            _ => ListTarget::Latest,
        }
    }
}

pub fn run_list(client: &mut Client, target: ListTarget, json: bool) -> Result<()> {
    match target {
        ListTarget::ContentSet(name) => {
            if !json {
                println!("Fetching available downloads from Red Hat Customer Portal...\n");
            }
            let images = client.list_images_by_content_set(&name)?;
            if json {
                print_json(&json!({ "content_set": name, "images": images }))?;
            } else {
                print!("{}", render_content_set(&name, &images));
            }
        }
        ListTarget::Release { version, arch } => {
            if !json {
                println!("Fetching available downloads from Red Hat Customer Portal...\n");
            }
            let images = client.list_images(&version, &arch)?;
            if json {
                print_json(&json!({
                    "version": version,
                    "architecture": arch,
                    "images": images,
                }))?;
            } else {
                print!("{}", render_release(&version, &arch, &images));
            }
        }
        ListTarget::Latest => {
            let arch = client.config().discovery.primary_arch.clone();
            if !json {
                println!("Fetching currently supported RHEL releases for {}...\n", arch);
            }
            let groups = client.latest_releases(&arch, LATEST_COUNT)?;
            if json {
                let releases: Vec<_> = groups
                    .iter()
                    .map(|(release, images)| {
                        json!({
                            "version": release.version,
                            "architecture": release.arch,
                            "images": images,
                        })
                    })
                    .collect();
                print_json(&json!({ "releases": releases }))?;
            } else {
                print!("{}", render_latest(&groups));
            }
        }
    }
    Ok(())
}

fn field(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("N/A")
}

pub(crate) fn render_content_set(name: &str, images: &[ImageRecord]) -> String {
    let mut out = String::new();
    if images.is_empty() {
        let _ = writeln!(out, "No images found for content set: {}", name);
        return out;
    }
    let _ = writeln!(out, "Available images in content set '{}':\n", name);
    for img in images {
        let _ = writeln!(out, "  {}", field(&img.filename));
        let _ = writeln!(out, "    Architecture: {}", field(&img.arch));
        let _ = writeln!(out, "    Checksum: {}", field(&img.checksum));
        let _ = writeln!(out, "    Published: {}\n", field(&img.date_published));
    }
    out
}

pub(crate) fn render_release(version: &str, arch: &str, images: &[ImageRecord]) -> String {
    let mut out = String::new();
    if images.is_empty() {
        let _ = writeln!(out, "No images found for RHEL {} ({})\n", version, arch);
        let _ = writeln!(out, "Try different version/arch combinations. Examples:");
        let _ = writeln!(out, "  rhiso list --version 9.6 --arch x86_64");
        let _ = writeln!(out, "  rhiso list --version 8.10 --arch aarch64");
        return out;
    }
    let _ = writeln!(out, "Available images for RHEL {} ({}):\n", version, arch);
    for img in images {
        let _ = writeln!(out, "  {}", field(&img.image_name));
        let _ = writeln!(out, "    Filename: {}", field(&img.filename));
        let _ = writeln!(out, "    Checksum: {}", field(&img.checksum));
        let _ = writeln!(out, "    Published: {}\n", field(&img.date_published));
    }
    out
}

pub(crate) fn render_latest(groups: &[(Release, Vec<ImageRecord>)]) -> String {
    let mut out = String::new();
    for (release, images) in groups {
        let _ = writeln!(out, "═══ {} ═══\n", release);
        for img in images {
            let _ = writeln!(out, "  {}", field(&img.image_name));
            let _ = writeln!(out, "    Filename: {}", field(&img.filename));
            let _ = writeln!(out, "    Checksum: {}\n", field(&img.checksum));
        }
        out.push('\n');
    }
    let _ = writeln!(out, "For other versions or architectures, use:");
    let _ = writeln!(out, "  rhiso list --version <version> --arch <arch>\n");
    let _ = writeln!(out, "Common architectures: x86_64, aarch64, ppc64le, s390x");
    out
}
