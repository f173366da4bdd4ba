use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProtonugError>;

#[derive(Error, Debug)]
pub enum ProtonugError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Invalid release metadata: {message}")]
    InvalidReleaseMetadata { message: String },

    #[error("No asset in the latest release matches '{pattern}' (available: {available})")]
    NoMatchingAsset { pattern: String, available: String },

    #[error("'{name}' does not match the expected '{pattern}' naming")]
    FormatMismatch { name: String, pattern: String },

    #[error("Download failed: {url}: {message}")]
    Download { url: String, message: String },

    #[error("Extraction failed: {path}: {message}")]
    Extraction { path: PathBuf, message: String },

    #[error("Failed to remove {path}: {source}")]
    Removal {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Home directory not found")]
    HomeDirectoryNotFound,

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl ProtonugError {
    pub fn network<S: Into<String>>(message: S) -> Self {
        ProtonugError::Network {
            message: message.into(),
        }
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        ProtonugError::Config {
            message: message.into(),
        }
    }

    pub fn download<U: Into<String>, S: Into<String>>(url: U, message: S) -> Self {
        ProtonugError::Download {
            url: url.into(),
            message: message.into(),
        }
    }

    pub fn extraction<S: Into<String>>(path: impl Into<PathBuf>, message: S) -> Self {
        ProtonugError::Extraction {
            path: path.into(),
            message: message.into(),
        }
    }
}
