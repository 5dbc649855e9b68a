//! CLI for listing and downloading Red Hat ISO images.

mod commands;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rhiso_core::{config, credentials, Client, RhisoConfig};
use std::path::{Path, PathBuf};

use commands::{run_checksum, run_download, run_list, run_versions, ListTarget};

pub use output::report_error;

/// Top-level CLI for rhiso.
#[derive(Debug, Parser)]
#[command(name = "rhiso")]
#[command(about = "List and download Red Hat ISO images with checksum verification", long_about = None)]
pub struct Cli {
    /// File holding the Red Hat API offline token (default from config: redhat-api-token.txt).
    #[arg(long, global = true, value_name = "PATH")]
    pub token_file: Option<PathBuf>,

    /// Print one JSON result (or error) object and no progress output.
    #[arg(long, global = true)]
    pub json: bool,

    /// Read configuration from this file instead of ~/.config/rhiso/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// List images: latest releases by default, or one version/arch, or a content set.
    List {
        /// RHEL version, e.g. 9.6 or 8.10.
        #[arg(long, requires = "arch")]
        version: Option<String>,

        /// Architecture, e.g. x86_64, aarch64, ppc64le, s390x.
        #[arg(long, requires = "version")]
        arch: Option<String>,

        /// Content set name, e.g. rhel-9-for-x86_64-baseos-isos.
        #[arg(long, conflicts_with_all = ["version", "arch"])]
        content_set: Option<String>,
    },

    /// Download an image by checksum (or by filename) and verify it.
    Download {
        /// SHA-256 checksum, or exact filename with --by-filename.
        identifier: String,

        /// Output directory (created if missing).
        #[arg(long, default_value = ".", value_name = "DIR")]
        output: PathBuf,

        /// Treat the identifier as a filename and search discovered releases for it.
        #[arg(long)]
        by_filename: bool,
    },

    /// Show releases discovered for an architecture.
    Versions {
        /// Architecture to probe (default: primary arch from config).
        #[arg(long)]
        arch: Option<String>,
    },

    /// Compute SHA-256 of a local file, optionally checking it against a digest.
    Checksum {
        /// Path to the file.
        path: PathBuf,

        /// Expected hex digest; exit non-zero on mismatch.
        #[arg(long, value_name = "HEX")]
        expect: Option<String>,
    },
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let cfg = match &self.config {
            Some(path) => config::load_from(path)?,
            None => config::load_or_init()?,
        };
        tracing::debug!("loaded config: {:?}", cfg);
        let json = self.json;

        match self.command {
            // Local only: no token needed.
            CliCommand::Checksum { path, expect } => {
                run_checksum(&path, expect.as_deref(), cfg.download.chunk_bytes, json)?
            }
            CliCommand::List {
                version,
                arch,
                content_set,
            } => {
                let target = ListTarget::from_args(version, arch, content_set);
                let mut client = client(cfg, self.token_file.as_deref())?;
                run_list(&mut client, target, json)?;
            }
            CliCommand::Download {
                identifier,
                output,
                by_filename,
            } => {
                let mut client = client(cfg, self.token_file.as_deref())?;
                run_download(&mut client, &identifier, &output, by_filename, json)?;
            }
            CliCommand::Versions { arch } => {
                let mut client = client(cfg, self.token_file.as_deref())?;
                let arch = arch.unwrap_or_else(|| client.config().discovery.primary_arch.clone());
                run_versions(&mut client, &arch, json)?;
            }
        }

        Ok(())
    }
}

/// Reads the offline token and builds the API client.
fn client(cfg: RhisoConfig, token_file: Option<&Path>) -> Result<Client> {
    let path = token_file.unwrap_or(&cfg.token_file).to_path_buf();
    let token = credentials::load_offline_token(&path)
        .with_context(|| format!("load offline token from {}", path.display()))?;
    Ok(Client::new(cfg, token))
}

#[cfg(test)]
mod tests;
