use crate::commands::cleanup::{self, CleanupReport};
use crate::core::config::Config;
use crate::core::decision::{decide, Decision};
use crate::core::download::Downloader;
use crate::core::github::{self, GitHubClient};
use crate::core::inventory;
use crate::error::Result;
use crate::utils::fs;
use semver::Version;
use std::io::Write;

/// Result of one `update` run.
#[derive(Debug)]
pub struct UpdateOutcome {
    pub decision: Decision,
    pub version: Version,
    pub build_name: String,
    pub cleanup: Option<CleanupReport>,
}

pub async fn update(clean: bool) -> Result<()> {
    let config = Config::load()?;
    run_update(&config, clean, true).await?;
    Ok(())
}

/// Fetch the latest release and install it if it is newer than what is on disk.
pub async fn run_update(config: &Config, clean: bool, show_progress: bool) -> Result<UpdateOutcome> {
    let client = github::build_http_client();
    let github_client = GitHubClient::new(client.clone(), config.github_token.clone());

    step("Getting the latest release of GE Proton...");
    let release = github_client.get_latest_release(&config.release_url).await?;
    println!(" Done");

    let (asset, remote) = github::find_build_asset(&release)?;
    log::info!(
        "latest release {}: {} ({})",
        release.tag_name.as_deref().unwrap_or("<untagged>"),
        asset.name,
        remote.version
    );

    if !config.install_dir.exists() {
        step(&format!(
            "Creating the Steam compatibility tools directory ({})...",
            config.install_dir.display()
        ));
        fs::ensure_dir_exists(&config.install_dir).await?;
        println!(" Done");
    }

    let installed = inventory::scan(&config.install_dir)?;
    if !installed.is_empty() {
        println!("Found existing GE Proton builds");
        log::debug!("installed builds: {}", installed.builds().len());
    }

    let decision = decide(&remote.version, installed.newest_version(), clean);
    log::info!("decision: {decision}");

    if !decision.downloads() {
        println!("GE Proton is up-to-date");
        return Ok(UpdateOutcome {
            decision,
            build_name: remote.directory_name(),
            version: remote.version,
            cleanup: None,
        });
    }

    if let Some(local) = installed.newest_version() {
        println!(
            "Found a newer version of GE Proton! ({} > {local})",
            remote.version
        );
    }
    if decision.cleans() {
        println!("Deferring removal of the existing GE Proton builds...");
    }

    let downloader = Downloader::new(client).with_progress(show_progress);
    let url = &asset.browser_download_url;
    let staged = downloader
        .stage(url, &config.download_dir, &asset.name)
        .await?;
    let label = format!(
        "Downloading the latest GE Proton build tarball... ({})",
        asset.name
    );
    downloader
        .download(
            url,
            &staged,
            &label,
            "Downloaded the latest GE Proton build tarball",
        )
        .await?;

    step("Extracting the latest GE Proton build from tarball...");
    downloader
        .extract_tar_gz(staged.path(), &config.install_dir)
        .await?;
    println!(" Done");

    step("Removing the downloaded GE Proton build tarball after extraction...");
    staged.close()?;
    println!(" Done");

    let cleanup = if decision.cleans() {
        let report = cleanup::remove_builds(&config.install_dir, installed.builds()).await;
        if !report.is_complete() {
            log::warn!("{} older build(s) could not be removed", report.failed.len());
        }
        Some(report)
    } else {
        None
    };

    println!(
        "Successfully {} GE Proton {}",
        if decision == Decision::Install {
            "installed"
        } else {
            "updated to"
        },
        remote.version
    );

    Ok(UpdateOutcome {
        decision,
        build_name: remote.directory_name(),
        version: remote.version,
        cleanup,
    })
}

fn step(message: &str) {
    print!("{message}");
    let _ = std::io::stdout().flush();
}
