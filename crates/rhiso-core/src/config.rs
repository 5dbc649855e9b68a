use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Per-call timeouts in seconds (optional `[timeouts]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Offline token exchange.
    pub token_secs: u64,
    /// Catalog listings (version/arch and content set).
    pub listing_secs: u64,
    /// Existence probes during version discovery.
    pub probe_secs: u64,
    /// Download-info (signed URL) lookup.
    pub download_info_secs: u64,
    /// Connect phase of the image stream.
    pub download_connect_secs: u64,
    /// Abort the image stream when it stays below 1 KiB/s this long.
    pub download_stall_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            token_secs: 30,
            listing_secs: 30,
            probe_secs: 10,
            download_info_secs: 60,
            download_connect_secs: 120,
            download_stall_secs: 120,
        }
    }
}

impl TimeoutConfig {
    pub fn token(&self) -> Duration {
        Duration::from_secs(self.token_secs)
    }

    pub fn listing(&self) -> Duration {
        Duration::from_secs(self.listing_secs)
    }

    pub fn probe(&self) -> Duration {
        Duration::from_secs(self.probe_secs)
    }

    pub fn download_info(&self) -> Duration {
        Duration::from_secs(self.download_info_secs)
    }
}

/// Known minor releases of one major version, probed first during discovery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineMajor {
    pub major: u32,
    pub minors: Vec<u32>,
}

impl BaselineMajor {
    pub fn new(major: u32, minors: &[u32]) -> Self {
        Self {
            major,
            minors: minors.to_vec(),
        }
    }
}

/// Version discovery parameters (optional `[discovery]` section).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Searched first by the filename resolver.
    pub primary_arch: String,
    pub secondary_arch: String,
    /// A release exists only if its listing has a file with this suffix.
    pub image_extension: String,
    /// Majors above the highest baseline major to try before giving up.
    pub max_new_majors: u32,
    /// Highest minor probed for a newly found major.
    pub max_new_minor: u32,
    /// Minors probed past the highest known minor of each baseline major.
    pub minor_lookahead: u32,
    pub baseline: Vec<BaselineMajor>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            primary_arch: "x86_64".to_string(),
            secondary_arch: "aarch64".to_string(),
            image_extension: ".iso".to_string(),
            max_new_majors: 4,
            max_new_minor: 9,
            minor_lookahead: 4,
            baseline: vec![
                BaselineMajor::new(10, &[0]),
                BaselineMajor::new(9, &[6, 5, 4]),
                BaselineMajor::new(8, &[10, 9, 8]),
            ],
        }
    }
}

/// Image stream parameters (optional `[download]` section).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    /// Receive and hash chunk size in bytes.
    pub chunk_bytes: usize,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            chunk_bytes: crate::checksum::DEFAULT_CHUNK_BYTES,
        }
    }
}

/// Global configuration loaded from `~/.config/rhiso/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RhisoConfig {
    /// Base URL of the management API (listing and download-info endpoints).
    pub api_base: String,
    /// OpenID Connect token endpoint used for the refresh-token grant.
    pub token_url: String,
    pub client_id: String,
    /// Plaintext file holding the offline token; relative paths resolve against the working dir.
    pub token_file: PathBuf,
    /// `limit` query parameter for content-set listings.
    pub content_set_limit: u32,
    pub timeouts: TimeoutConfig,
    pub discovery: DiscoveryConfig,
    pub download: DownloadConfig,
}

impl Default for RhisoConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.access.redhat.com/management/v1".to_string(),
            token_url:
                "https://sso.redhat.com/auth/realms/redhat-external/protocol/openid-connect/token"
                    .to_string(),
            client_id: "rhsm-api".to_string(),
            token_file: PathBuf::from("redhat-api-token.txt"),
            content_set_limit: 100,
            timeouts: TimeoutConfig::default(),
            discovery: DiscoveryConfig::default(),
            download: DownloadConfig::default(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("rhiso")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from an explicit path. The file must exist.
pub fn load_from(path: &Path) -> Result<RhisoConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: RhisoConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<RhisoConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = RhisoConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(&path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = RhisoConfig::default();
        assert_eq!(cfg.client_id, "rhsm-api");
        assert_eq!(cfg.content_set_limit, 100);
        assert_eq!(cfg.timeouts.probe(), Duration::from_secs(10));
        assert!(cfg.timeouts.probe_secs < cfg.timeouts.listing_secs);
        assert!(cfg.timeouts.listing_secs < cfg.timeouts.download_info_secs);
        assert_eq!(cfg.discovery.primary_arch, "x86_64");
        assert_eq!(cfg.discovery.secondary_arch, "aarch64");
        assert_eq!(cfg.discovery.baseline.len(), 3);
        assert_eq!(cfg.discovery.baseline[1], BaselineMajor::new(9, &[6, 5, 4]));
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = RhisoConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: RhisoConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn empty_file_gives_defaults() {
        let cfg: RhisoConfig = toml::from_str("").unwrap();
        assert_eq!(cfg, RhisoConfig::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let toml = r#"
            api_base = "http://127.0.0.1:8080/management/v1"
            token_file = "/etc/rhiso/token"

            [timeouts]
            probe_secs = 3

            [discovery]
            image_extension = ".qcow2"

            [[discovery.baseline]]
            major = 9
            minors = [6]
        "#;
        let cfg: RhisoConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.api_base, "http://127.0.0.1:8080/management/v1");
        assert_eq!(cfg.token_file, PathBuf::from("/etc/rhiso/token"));
        assert_eq!(cfg.timeouts.probe_secs, 3);
        assert_eq!(cfg.timeouts.listing_secs, 30);
        assert_eq!(cfg.discovery.image_extension, ".qcow2");
        assert_eq!(cfg.discovery.baseline, vec![BaselineMajor::new(9, &[6])]);
        assert_eq!(cfg.discovery.primary_arch, "x86_64");
        assert_eq!(cfg.download.chunk_bytes, 64 * 1024);
    }

    #[test]
    fn load_from_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "content_set_limit = 25\n").unwrap();
        let cfg = load_from(&path).unwrap();
        assert_eq!(cfg.content_set_limit, 25);
        assert!(load_from(&dir.path().join("missing.toml")).is_err());
    }
}
