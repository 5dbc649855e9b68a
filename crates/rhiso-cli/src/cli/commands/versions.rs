//! `rhiso versions`: releases found by discovery.

use anyhow::Result;
use rhiso_core::Client;
use serde_json::json;

use crate::cli::output::print_json;

pub fn run_versions(client: &mut Client, arch: &str, json: bool) -> Result<()> {
    if !json {
        println!("Discovering RHEL releases for {}...", arch);
        println!();
    }
    let releases = client.discover_versions(arch)?;

    if json {
        print_json(&json!({ "architecture": arch, "releases": releases }))?;
        return Ok(());
    }

    if releases.is_empty() {
        println!("No RHEL releases found for {}", arch);
        return Ok(());
    }
    println!("Found {} RHEL versions:", releases.len());
    for release in &releases {
        println!("  {}", release);
    }
    Ok(())
}
