//! Shared fixtures: a stub catalog served by `stub_server`.
#![allow(dead_code)]

pub mod stub_server;

use rhiso_core::config::{BaselineMajor, DiscoveryConfig};
use rhiso_core::{Client, RhisoConfig};
use serde_json::{json, Value};
use sha2::{Digest, Sha256};
use stub_server::{Reply, StubServer};

pub const API: &str = "/management/v1";
pub const TOKEN_PATH: &str = "/auth/realms/test/token";
pub const ACCESS_TOKEN: &str = "bearer-from-stub";
pub const OFFLINE_TOKEN: &str = "offline-refresh-token";

/// Config pointing every endpoint at `server`.
pub fn config_for(server: &StubServer) -> RhisoConfig {
    RhisoConfig {
        api_base: server.url(API),
        token_url: server.url(TOKEN_PATH),
        ..RhisoConfig::default()
    }
}

/// Config with a small discovery table: baseline 9.6 only, one lookahead.
pub fn small_config_for(server: &StubServer) -> RhisoConfig {
    RhisoConfig {
        discovery: DiscoveryConfig {
            baseline: vec![BaselineMajor::new(9, &[6])],
            max_new_majors: 1,
            max_new_minor: 2,
            minor_lookahead: 1,
            ..DiscoveryConfig::default()
        },
        ..config_for(server)
    }
}

/// Server with the token endpoint already answering.
pub fn catalog_server() -> StubServer {
    let server = StubServer::start();
    serve_token(&server, ACCESS_TOKEN);
    server
}

pub fn client_for(server: &StubServer) -> Client {
    Client::new(config_for(server), OFFLINE_TOKEN)
}

pub fn serve_token(server: &StubServer, token: &str) {
    server.route(
        "POST",
        TOKEN_PATH,
        Reply::json(
            200,
            &json!({"access_token": token, "token_type": "Bearer", "expires_in": 900}),
        ),
    );
}

pub fn listing_path(version: &str, arch: &str) -> String {
    format!("{}/images/rhel/{}/{}", API, version, arch)
}

pub fn cset_path(name: &str) -> String {
    format!("{}/images/cset/{}", API, name)
}

pub fn download_info_path(checksum: &str) -> String {
    format!("{}/images/{}/download", API, checksum)
}

pub fn serve_listing(server: &StubServer, version: &str, arch: &str, records: Vec<Value>) {
    server.route(
        "GET",
        &listing_path(version, arch),
        Reply::json(200, &json!({ "body": records })),
    );
}

/// A catalog record for an ISO.
pub fn iso(filename: &str, checksum: &str, date: &str) -> Value {
    json!({
        "imageName": format!("Image {}", filename),
        "filename": filename,
        "checksum": checksum,
        "datePublished": date,
        "arch": "x86_64",
    })
}

/// Serves `body` under `/cdn/<filename>` and the matching 307 download info.
pub fn serve_image(server: &StubServer, checksum: &str, filename: &str, body: Vec<u8>) {
    let cdn_path = format!("/cdn/content/{}", filename);
    let href = format!("{}?_auth_=signed", server.url(&cdn_path));
    server.route("GET", &cdn_path, Reply::bytes(200, body));
    server.route(
        "GET",
        &download_info_path(checksum),
        Reply::json(
            307,
            &json!({"body": {"href": href, "filename": filename}}),
        )
        .with_header("Location", &href),
    );
}

pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Deterministic image-like payload spanning several chunks.
pub fn payload(len: usize) -> Vec<u8> {
    (0u8..=250).cycle().take(len).collect()
}
