use semver::Version;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Nothing installed yet.
    Install,
    /// Newer build available; older builds are kept.
    Update,
    /// Newer build available; older builds are removed after it lands.
    UpdateAndClean,
    /// Newest local build is already at or above the remote one.
    NoOp,
}

impl Decision {
    pub fn downloads(self) -> bool {
        !matches!(self, Decision::NoOp)
    }

    pub fn cleans(self) -> bool {
        matches!(self, Decision::UpdateAndClean)
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Decision::Install => "install",
            Decision::Update => "update",
            Decision::UpdateAndClean => "update and clean",
            Decision::NoOp => "no-op",
        };
        f.write_str(text)
    }
}

/// Equal versions count as up to date.
pub fn decide(remote: &Version, newest_local: Option<&Version>, clean: bool) -> Decision {
    match newest_local {
        None => Decision::Install,
        Some(local) if remote > local => {
            if clean {
                Decision::UpdateAndClean
            } else {
                Decision::Update
            }
        }
        Some(_) => Decision::NoOp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(major: u64, minor: u64) -> Version {
        Version::new(major, minor, 0)
    }

    #[test]
    fn test_install_when_nothing_local() {
        assert_eq!(decide(&v(9, 1), None, false), Decision::Install);
        // Clean mode has nothing to prune on a fresh install.
        assert_eq!(decide(&v(9, 1), None, true), Decision::Install);
    }

    #[test]
    fn test_update_when_remote_is_newer() {
        assert_eq!(decide(&v(9, 1), Some(&v(8, 25)), false), Decision::Update);
        assert_eq!(
            decide(&v(9, 1), Some(&v(8, 25)), true),
            Decision::UpdateAndClean
        );
        assert_eq!(decide(&v(8, 26), Some(&v(8, 25)), false), Decision::Update);
    }

    #[test]
    fn test_equal_is_up_to_date() {
        assert_eq!(decide(&v(9, 1), Some(&v(9, 1)), false), Decision::NoOp);
        assert_eq!(decide(&v(9, 1), Some(&v(9, 1)), true), Decision::NoOp);
    }

    #[test]
    fn test_older_remote_is_noop() {
        assert_eq!(decide(&v(8, 25), Some(&v(9, 1)), true), Decision::NoOp);
    }

    #[test]
    fn test_decision_is_deterministic() {
        let local = v(8, 25);
        let first = decide(&v(9, 1), Some(&local), true);
        for _ in 0..10 {
            assert_eq!(decide(&v(9, 1), Some(&local), true), first);
        }
    }

    #[test]
    fn test_decision_flags() {
        assert!(Decision::Install.downloads());
        assert!(!Decision::NoOp.downloads());
        assert!(Decision::UpdateAndClean.cleans());
        assert!(!Decision::Update.cleans());
    }
}
