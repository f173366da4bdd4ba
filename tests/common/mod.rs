//! Shared fixtures for the end-to-end update tests.

use flate2::write::GzEncoder;
use flate2::Compression;
use protonug::core::config::Config;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const RELEASE_PATH: &str = "/repos/GloriousEggroll/proton-ge-custom/releases/latest";

/// Scratch install and download directories for one test.
pub struct Workspace {
    pub temp: TempDir,
    pub config: Config,
}

impl Workspace {
    pub fn new(server: &MockServer) -> Self {
        let temp = TempDir::new().unwrap();
        let config = Config {
            release_url: format!("{}{RELEASE_PATH}", server.uri()),
            install_dir: temp
                .path()
                .join(".steam")
                .join("root")
                .join("compatibilitytools.d"),
            download_dir: temp.path().join("downloads"),
            github_token: None,
        };
        Self { temp, config }
    }

    pub fn install(&self, names: &[&str]) {
        for name in names {
            let dir = self.config.install_dir.join(name);
            std::fs::create_dir_all(dir.join("files")).unwrap();
            std::fs::write(dir.join("version"), name.as_bytes()).unwrap();
        }
    }

    pub fn installed(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(&self.config.install_dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    pub fn downloads_dir(&self) -> PathBuf {
        self.config.download_dir.clone()
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }
}

/// A gzip tarball with a single top-level `<build>/` directory.
pub fn build_tarball(build: &str) -> Vec<u8> {
    let mut builder = tar::Builder::new(GzEncoder::new(Vec::new(), Compression::fast()));

    for (file, body) in [
        ("proton", &b"#!/usr/bin/env python3\n"[..]),
        ("version", build.as_bytes()),
    ] {
        let mut header = tar::Header::new_gnu();
        header.set_size(body.len() as u64);
        header.set_mode(0o755);
        header.set_cksum();
        builder
            .append_data(&mut header, format!("{build}/{file}"), body)
            .unwrap();
    }

    builder.into_inner().unwrap().finish().unwrap()
}

pub fn release_json(server: &MockServer, asset_names: &[&str]) -> serde_json::Value {
    let assets: Vec<serde_json::Value> = asset_names
        .iter()
        .map(|name| {
            serde_json::json!({
                "name": name,
                "browser_download_url": format!("{}/download/{name}", server.uri()),
                "size": 0,
            })
        })
        .collect();

    serde_json::json!({
        "tag_name": "GE-Proton9-1",
        "assets": assets,
    })
}

pub async fn mock_release(server: &MockServer, asset_names: &[&str]) {
    Mock::given(method("GET"))
        .and(path(RELEASE_PATH))
        .and(header("accept", "application/vnd.github+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(release_json(server, asset_names)))
        .expect(1)
        .mount(server)
        .await;
}

/// Serve the tarball for `build` and expect it to be fetched `times` times.
pub async fn mock_asset(server: &MockServer, build: &str, times: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/download/{build}.tar.gz")))
        .and(header("accept", "application/octet-stream"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(build_tarball(build)))
        .expect(times)
        .mount(server)
        .await;
}
