use crate::error::{ProtonugError, Result};
use semver::Version;
use std::cmp::Ordering;
use std::fmt;

/// Prefix shared by release tarballs and the directories they unpack into.
pub const BUILD_PREFIX: &str = "GE-Proton";

/// Suffix of the distributable archive published with each release.
pub const ARCHIVE_SUFFIX: &str = ".tar.gz";

/// Which of the two naming conventions a name is expected to follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    /// `GE-Proton<major>-<minor>.tar.gz`
    Archive,
    /// `GE-Proton<major>-<minor>`
    Directory,
}

impl NameKind {
    fn suffix(self) -> &'static str {
        match self {
            NameKind::Archive => ARCHIVE_SUFFIX,
            NameKind::Directory => "",
        }
    }

    pub fn pattern(self) -> String {
        format!("{BUILD_PREFIX}<major>-<minor>{}", self.suffix())
    }
}

/// A named build together with its normalized `major.minor.0` version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Build {
    pub name: String,
    pub version: Version,
}

impl Build {
    pub fn parse(name: &str, kind: NameKind) -> Result<Self> {
        Ok(Build {
            name: name.to_string(),
            version: parse_build_name(name, kind)?,
        })
    }

    /// Name of the directory this build occupies once unpacked.
    pub fn directory_name(&self) -> String {
        format!(
            "{BUILD_PREFIX}{}-{}",
            self.version.major, self.version.minor
        )
    }
}

impl fmt::Display for Build {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.version)
    }
}

/// Decode the `major-minor` token embedded in a build name into `major.minor.0`.
pub fn parse_build_name(name: &str, kind: NameKind) -> Result<Version> {
    let mismatch = || ProtonugError::FormatMismatch {
        name: name.to_string(),
        pattern: kind.pattern(),
    };

    let token = name
        .strip_prefix(BUILD_PREFIX)
        .and_then(|rest| rest.strip_suffix(kind.suffix()))
        .ok_or_else(mismatch)?;

    let (major, minor) = token.split_once('-').ok_or_else(mismatch)?;
    let major = parse_component(major).ok_or_else(mismatch)?;
    let minor = parse_component(minor).ok_or_else(mismatch)?;

    Ok(Version::new(major, minor, 0))
}

fn parse_component(part: &str) -> Option<u64> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// Builds sort newest first.
pub fn newest_first(a: &Build, b: &Build) -> Ordering {
    b.version.cmp(&a.version)
}
