use crate::core::version::{newest_first, Build, NameKind};
use crate::error::{ProtonugError, Result};
use semver::Version;
use std::path::Path;

/// Builds found in the installation directory, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    builds: Vec<Build>,
}

impl Inventory {
    pub fn new(mut builds: Vec<Build>) -> Self {
        builds.sort_by(newest_first);
        Self { builds }
    }

    pub fn builds(&self) -> &[Build] {
        &self.builds
    }

    pub fn newest(&self) -> Option<&Build> {
        self.builds.first()
    }

    pub fn newest_version(&self) -> Option<&Version> {
        self.newest().map(|build| &build.version)
    }

    pub fn is_empty(&self) -> bool {
        self.builds.is_empty()
    }
}

/// List installed builds. A missing directory is an empty inventory.
pub fn scan(install_dir: &Path) -> Result<Inventory> {
    if !install_dir.exists() {
        log::debug!("{} does not exist yet", install_dir.display());
        return Ok(Inventory::default());
    }

    let mut builds = Vec::new();

    for entry in std::fs::read_dir(install_dir)? {
        let entry = entry?;
        let file_name = entry.file_name();
        let name = file_name
            .to_str()
            .ok_or_else(|| ProtonugError::FormatMismatch {
                name: file_name.to_string_lossy().to_string(),
                pattern: NameKind::Directory.pattern(),
            })?;

        builds.push(Build::parse(name, NameKind::Directory)?);
    }

    log::debug!(
        "found {} build(s) in {}",
        builds.len(),
        install_dir.display()
    );

    Ok(Inventory::new(builds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_missing_directory_is_empty() {
        let temp = TempDir::new().unwrap();
        let inventory = scan(&temp.path().join("compatibilitytools.d")).unwrap();
        assert!(inventory.is_empty());
        assert_eq!(inventory.newest(), None);
    }

    #[test]
    fn test_scan_sorts_newest_first() {
        let temp = TempDir::new().unwrap();
        for name in ["GE-Proton8-9", "GE-Proton9-1", "GE-Proton8-25"] {
            std::fs::create_dir(temp.path().join(name)).unwrap();
        }

        let inventory = scan(temp.path()).unwrap();
        let names: Vec<&str> = inventory.builds().iter().map(|b| b.name.as_str()).collect();

        assert_eq!(names, vec!["GE-Proton9-1", "GE-Proton8-25", "GE-Proton8-9"]);
        assert_eq!(inventory.newest_version(), Some(&Version::new(9, 1, 0)));
        assert_eq!(inventory.builds().len(), 3);
    }

    #[test]
    fn test_unrecognized_entry_is_fatal() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("GE-Proton9-1")).unwrap();
        std::fs::create_dir(temp.path().join("Proton-Custom")).unwrap();

        let err = scan(temp.path()).unwrap_err();
        match err {
            ProtonugError::FormatMismatch { name, .. } => assert_eq!(name, "Proton-Custom"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
