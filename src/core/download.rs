use crate::core::progress::ProgressReporter;
use crate::error::{ProtonugError, Result};
use flate2::read::GzDecoder;
use futures_util::StreamExt;
use reqwest::header::ACCEPT;
use reqwest::Client;
use std::fs::File;
use std::path::Path;
use tar::Archive;
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;

pub struct Downloader {
    client: Client,
    show_progress: bool,
}

impl Downloader {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            show_progress: true,
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Create a uniquely named staging file for `asset_name` inside `dir`.
    pub async fn stage(&self, url: &str, dir: &Path, asset_name: &str) -> Result<NamedTempFile> {
        tokio::fs::create_dir_all(dir).await.map_err(|e| {
            ProtonugError::download(url, format!("failed to create {}: {e}", dir.display()))
        })?;

        let staged = tempfile::Builder::new()
            .prefix(&format!("{asset_name}."))
            .tempfile_in(dir)
            .map_err(|e| {
                ProtonugError::download(
                    url,
                    format!("failed to create staging file in {}: {e}", dir.display()),
                )
            })?;

        log::debug!("staging {url} at {}", staged.path().display());
        Ok(staged)
    }

    /// Stream `url` into `staged`, drawing `label` while it runs and leaving
    /// `finished` on the line once every declared byte has arrived.
    /// Returns the number of bytes written.
    pub async fn download(
        &self,
        url: &str,
        staged: &NamedTempFile,
        label: &str,
        finished: &str,
    ) -> Result<u64> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/octet-stream")
            .send()
            .await
            .map_err(|e| ProtonugError::download(url, format!("request failed: {e}")))?
            .error_for_status()
            .map_err(|e| ProtonugError::download(url, e.to_string()))?;

        let handle = staged.as_file().try_clone().map_err(|e| {
            ProtonugError::download(
                url,
                format!("failed to open {}: {e}", staged.path().display()),
            )
        })?;
        let mut file = tokio::fs::File::from_std(handle);

        let total = response.content_length();
        let reporter = if self.show_progress {
            ProgressReporter::start(label, total)
        } else {
            ProgressReporter::hidden(label, total)
        };

        let mut stream = response.bytes_stream();
        let streamed: Result<()> = async {
            while let Some(chunk) = stream.next().await {
                let chunk =
                    chunk.map_err(|e| ProtonugError::download(url, format!("stream error: {e}")))?;
                file.write_all(&chunk)
                    .await
                    .map_err(|e| ProtonugError::download(url, format!("write error: {e}")))?;
                reporter.advance(chunk.len() as u64);
            }
            file.flush()
                .await
                .map_err(|e| ProtonugError::download(url, format!("flush error: {e}")))
        }
        .await;

        let written = reporter.written();
        let incomplete = total.is_some_and(|total| written < total);

        if streamed.is_err() || incomplete {
            reporter.abandon().await;
            streamed?;
            return Err(ProtonugError::download(
                url,
                format!(
                    "download incomplete: received {written} of {} bytes",
                    total.unwrap_or_default()
                ),
            ));
        }

        reporter.finish(finished).await;
        log::info!("downloaded {written} bytes from {url}");
        Ok(written)
    }

    /// Unpack a gzip-compressed tarball into `destination`.
    pub async fn extract_tar_gz(&self, archive_path: &Path, destination: &Path) -> Result<()> {
        let source = archive_path.to_path_buf();
        let destination = destination.to_path_buf();

        tokio::task::spawn_blocking(move || unpack(&source, &destination))
            .await
            .map_err(|e| ProtonugError::extraction(archive_path, e.to_string()))?
    }
}

fn unpack(archive_path: &Path, destination: &Path) -> Result<()> {
    log::debug!(
        "extracting {} into {}",
        archive_path.display(),
        destination.display()
    );

    let file = File::open(archive_path)
        .map_err(|e| ProtonugError::extraction(archive_path, e.to_string()))?;
    let mut archive = Archive::new(GzDecoder::new(file));
    archive
        .unpack(destination)
        .map_err(|e| ProtonugError::extraction(archive_path, e.to_string()))?;

    Ok(())
}
