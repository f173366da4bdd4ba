use crate::core::version::Build;
use crate::error::ProtonugError;
use crate::utils::fs;
use std::io::Write;
use std::path::Path;

/// What happened to each superseded build.
#[derive(Debug, Default)]
pub struct CleanupReport {
    pub removed: Vec<String>,
    pub failed: Vec<ProtonugError>,
}

impl CleanupReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Remove every build in `builds` from `install_dir`.
///
/// Failures are reported and skipped; a partially cleaned directory is a
/// valid end state.
pub async fn remove_builds(install_dir: &Path, builds: &[Build]) -> CleanupReport {
    let mut report = CleanupReport::default();

    if builds.is_empty() {
        return report;
    }

    println!("Removing existing older GE Proton builds:");

    for build in builds {
        print!("Removing {}...", build.name);
        let _ = std::io::stdout().flush();

        match fs::remove_entry(&install_dir.join(&build.name)).await {
            Ok(()) => {
                println!(" Done");
                report.removed.push(build.name.clone());
            }
            Err(e) => {
                println!(" Failed");
                log::warn!("{e}");
                eprintln!("{e}");
                report.failed.push(e);
            }
        }
    }

    report
}
