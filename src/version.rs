use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseVersionError {
    #[error("'{0}' is not a valid version number")]
    Invalid(String),
}

/// A dotted numeric version with two to four components, e.g. `17.0`,
/// `17.0.1` or `17.0.31903.59`.
///
/// Missing components sort before any present component, so ordering is the
/// numeric comparison of (major, minor, build, revision).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub build: Option<u32>,
    pub revision: Option<u32>,
}

impl Version {
    pub const fn new(major: u32, minor: u32) -> Self {
        Version { major, minor, build: None, revision: None }
    }

    pub const fn with_build(major: u32, minor: u32, build: u32) -> Self {
        Version { major, minor, build: Some(build), revision: None }
    }

    pub const fn full(major: u32, minor: u32, build: u32, revision: u32) -> Self {
        Version { major, minor, build: Some(build), revision: Some(revision) }
    }

    /// `major.minor` only.
    pub fn is_two_part(&self) -> bool {
        self.build.is_none() && self.revision.is_none()
    }

    /// `major.minor.build`, no revision.
    pub fn is_three_part(&self) -> bool {
        self.build.is_some() && self.revision.is_none()
    }

    /// `major.minor.build.revision`, the form used for build versions.
    pub fn is_four_part(&self) -> bool {
        self.build.is_some() && self.revision.is_some()
    }

    pub fn has_same_major_minor(&self, other: &Version) -> bool {
        self.major == other.major && self.minor == other.minor
    }
}

impl FromStr for Version {
    type Err = ParseVersionError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseVersionError::Invalid(input.to_string());

        let mut parts = Vec::with_capacity(4);
        for part in input.split('.') {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            parts.push(part.parse::<u32>().map_err(|_| invalid())?);
        }

        match parts[..] {
            [major, minor] => Ok(Version::new(major, minor)),
            [major, minor, build] => Ok(Version::with_build(major, minor, build)),
            [major, minor, build, revision] => Ok(Version::full(major, minor, build, revision)),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Version {
    type Error = ParseVersionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Version> for String {
    fn from(version: Version) -> Self {
        version.to_string()
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)?;
        if let Some(build) = self.build {
            write!(f, ".{build}")?;
            if let Some(revision) = self.revision {
                write!(f, ".{revision}")?;
            }
        }
        Ok(())
    }
}
