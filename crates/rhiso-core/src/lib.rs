//! Client for the Red Hat Customer Portal image download API.
//!
//! Exchanges an offline token for a bearer token, queries the image catalog,
//! discovers which RHEL releases are published, and downloads images with
//! SHA-256 verification. Everything runs sequentially on the calling thread.

pub mod config;
pub mod logging;

pub mod auth;
pub mod catalog;
pub mod checksum;
pub mod client;
pub mod credentials;
pub mod discovery;
pub mod download;
pub mod error;
pub mod http;
pub mod progress;
pub mod resolver;
pub mod url_model;
pub mod version;

pub use catalog::ImageRecord;
pub use client::Client;
pub use config::RhisoConfig;
pub use download::{DownloadInfo, DownloadResult};
pub use error::{Error, Result};
pub use progress::{NoopReporter, Reporter};
pub use version::{Release, Version};
