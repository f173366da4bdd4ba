use crate::core::version::{Build, NameKind};
use crate::error::{ProtonugError, Result};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::Client;
use serde::Deserialize;

pub const USER_AGENT: &str = concat!("protonug/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize, Clone)]
pub struct Release {
    #[serde(default)]
    pub tag_name: Option<String>,
    pub assets: Vec<Asset>,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Asset {
    pub name: String,
    pub browser_download_url: String,
}

/// Shared HTTP client for the metadata request and the asset download.
pub fn build_http_client() -> Client {
    Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .unwrap_or_else(|err| {
            log::warn!("falling back to default HTTP client configuration ({err})");
            Client::new()
        })
}

pub struct GitHubClient {
    client: Client,
    github_token: Option<String>,
}

impl GitHubClient {
    pub fn new(client: Client, github_token: Option<String>) -> Self {
        Self {
            client,
            github_token,
        }
    }

    pub async fn get_latest_release(&self, url: &str) -> Result<Release> {
        log::debug!("GET {url}");

        let mut request = self
            .client
            .get(url)
            .header(ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.github_token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        let response = request
            .send()
            .await
            .map_err(|e| ProtonugError::network(format!("request to {url} failed: {e}")))?;

        if !response.status().is_success() {
            return Err(ProtonugError::network(format!(
                "{url} returned status {}",
                response.status()
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ProtonugError::network(format!("failed to read response: {e}")))?;

        parse_release(&body)
    }
}

pub fn parse_release(body: &[u8]) -> Result<Release> {
    serde_json::from_slice(body).map_err(|e| ProtonugError::InvalidReleaseMetadata {
        message: e.to_string(),
    })
}

/// Pick the first asset following the archive naming convention.
pub fn find_build_asset(release: &Release) -> Result<(&Asset, Build)> {
    release
        .assets
        .iter()
        .find_map(|asset| {
            Build::parse(&asset.name, NameKind::Archive)
                .ok()
                .map(|build| (asset, build))
        })
        .ok_or_else(|| {
            let available: Vec<&str> = release.assets.iter().map(|a| a.name.as_str()).collect();
            ProtonugError::NoMatchingAsset {
                pattern: NameKind::Archive.pattern(),
                available: if available.is_empty() {
                    "none".to_string()
                } else {
                    available.join(", ")
                },
            }
        })
}
