use crate::error::{ProtonugError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_RELEASE_URL: &str =
    "https://api.github.com/repos/GloriousEggroll/proton-ge-custom/releases/latest";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Release metadata endpoint returning the latest release.
    pub release_url: String,
    /// Steam compatibility tools directory builds are unpacked into.
    pub install_dir: PathBuf,
    /// Where the tarball is staged while downloading.
    pub download_dir: PathBuf,
    pub github_token: Option<String>,
}

/// On-disk overrides; every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    release_url: Option<String>,
    install_dir: Option<PathBuf>,
    download_dir: Option<PathBuf>,
    github_token: Option<String>,
}

impl Config {
    pub fn new() -> Result<Self> {
        let home = dirs::home_dir().ok_or(ProtonugError::HomeDirectoryNotFound)?;
        Ok(Self::with_home(&home))
    }

    pub fn with_home(home: &Path) -> Self {
        Config {
            release_url: DEFAULT_RELEASE_URL.to_string(),
            install_dir: get_install_dir(home),
            download_dir: std::env::temp_dir(),
            github_token: None,
        }
    }

    /// Defaults, then the optional config file, then `GITHUB_TOKEN`.
    pub fn load() -> Result<Self> {
        let mut config = Self::new()?;

        if let Some(path) = get_config_path() {
            if path.exists() {
                log::debug!("loading config from {}", path.display());
                config.apply_file(&path)?;
            }
        }

        if let Ok(token) = std::env::var("GITHUB_TOKEN") {
            if !token.trim().is_empty() {
                config.github_token = Some(token.trim().to_string());
            }
        }

        Ok(config)
    }

    pub fn apply_file(&mut self, path: &Path) -> Result<()> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ProtonugError::config(format!("failed to read {}: {e}", path.display()))
        })?;
        let file: ConfigFile = serde_json::from_str(&content).map_err(|e| {
            ProtonugError::config(format!("failed to parse {}: {e}", path.display()))
        })?;

        if let Some(url) = file.release_url {
            self.release_url = url;
        }
        if let Some(dir) = file.install_dir {
            self.install_dir = dir;
        }
        if let Some(dir) = file.download_dir {
            self.download_dir = dir;
        }
        if file.github_token.is_some() {
            self.github_token = file.github_token;
        }

        Ok(())
    }
}

fn get_install_dir(home: &Path) -> PathBuf {
    home.join(".steam").join("root").join("compatibilitytools.d")
}

fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("protonug").join("config.json"))
}
