//! RHEL release identifiers.
//!
//! Ordering is numeric on (major, minor), so `10.0 > 9.6` and `8.10 > 8.9`.

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A `major.minor` release number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
}

impl Version {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid version {0:?}: expected MAJOR.MINOR")]
pub struct ParseVersionError(String);

impl FromStr for Version {
    type Err = ParseVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseVersionError(s.to_string());
        let (major, minor) = s.trim().split_once('.').ok_or_else(err)?;
        Ok(Version {
            major: major.parse().map_err(|_| err())?,
            minor: minor.parse().map_err(|_| err())?,
        })
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A published (version, architecture) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Release {
    pub version: Version,
    #[serde(rename = "architecture")]
    pub arch: String,
}

impl Release {
    pub fn new(version: Version, arch: impl Into<String>) -> Self {
        Self {
            version,
            arch: arch.into(),
        }
    }
}

impl fmt::Display for Release {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RHEL {} ({})", self.version, self.arch)
    }
}

/// Sorts newest first by numeric version. Stable, so equal versions keep input order.
pub fn sort_newest_first(releases: &mut [Release]) {
    releases.sort_by(|a, b| b.version.cmp(&a.version));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        s.parse().unwrap()
    }

    #[test]
    fn parse_and_display() {
        assert_eq!(v("9.6"), Version::new(9, 6));
        assert_eq!(v(" 10.0 "), Version::new(10, 0));
        assert_eq!(Version::new(8, 10).to_string(), "8.10");
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("9".parse::<Version>().is_err());
        assert!("9.x".parse::<Version>().is_err());
        assert!("nine.six".parse::<Version>().is_err());
        assert!("9.6.1".parse::<Version>().is_err());
        assert!("".parse::<Version>().is_err());
    }

    #[test]
    fn numeric_not_lexicographic() {
        assert!(v("10.0") > v("9.6"));
        assert!(v("8.10") > v("8.9"));
        assert!("10.0" < "9.6", "string order would be wrong");
    }

    #[test]
    fn sort_descending() {
        let mut releases: Vec<Release> = ["8.10", "9.6", "10.0", "8.9", "9.4"]
            .iter()
            .map(|s| Release::new(v(s), "x86_64"))
            .collect();
        sort_newest_first(&mut releases);
        let order: Vec<String> = releases.iter().map(|r| r.version.to_string()).collect();
        assert_eq!(order, ["10.0", "9.6", "9.4", "8.10", "8.9"]);
    }

    #[test]
    fn release_serializes_version_as_string() {
        let r = Release::new(Version::new(9, 6), "aarch64");
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["version"], "9.6");
        assert_eq!(json["architecture"], "aarch64");
    }
}
