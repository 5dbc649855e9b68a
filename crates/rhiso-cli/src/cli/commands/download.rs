//! `rhiso download`: fetch, verify, report.

use anyhow::Result;
use rhiso_core::{Client, DownloadResult};
use serde_json::json;
use std::path::Path;

use crate::cli::output::{print_json, Narrator};

pub fn run_download(
    client: &mut Client,
    identifier: &str,
    output_dir: &Path,
    by_filename: bool,
    json: bool,
) -> Result<()> {
    let narrator = Narrator::new(json);
    let result = client.download(identifier, output_dir, by_filename, &narrator)?;
    narrator.finish();

    if json {
        print_json(&json!({
            "filename": result.filename,
            "checksum": result.checksum,
            "path": result.path.display().to_string(),
            "size": result.size,
            "verified": result.verified,
            "status": "completed",
        }))?;
    } else {
        print!("{}", render_result(&result));
    }
    Ok(())
}

pub(crate) fn render_result(result: &DownloadResult) -> String {
    format!(
        "\nDownload complete!\n  File: {}\n  Path: {}\n  Size: {} bytes\n  Checksum: {}\n  Verified: {}\n",
        result.filename,
        result.path.display(),
        group_thousands(result.size),
        result.checksum,
        result.verified,
    )
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
