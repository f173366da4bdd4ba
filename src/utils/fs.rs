use crate::error::{ProtonugError, Result};
use std::path::Path;

pub async fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        tokio::fs::create_dir_all(path).await?;
    }
    Ok(())
}

/// Remove a directory tree, or a plain file if that is what sits at `path`.
pub async fn remove_entry(path: &Path) -> Result<()> {
    let removal = |source: std::io::Error| ProtonugError::Removal {
        path: path.to_path_buf(),
        source,
    };

    let metadata = tokio::fs::symlink_metadata(path).await.map_err(removal)?;
    if metadata.is_dir() {
        tokio::fs::remove_dir_all(path).await.map_err(removal)
    } else {
        tokio::fs::remove_file(path).await.map_err(removal)
    }
}
