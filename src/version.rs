//! Cluster version values.
//!
//! Versions follow the dotted-numeric format clusters report from their root
//! endpoint: `major.minor.revision`, optionally followed by a pre-release
//! stage (`-alpha1`, `-beta2`, `-rc1`) and a `-SNAPSHOT` marker.
//!
//! # Example
//!
//! ```
//! use clustergate::version::Version;
//!
//! let remote: Version = "7.3.1".parse().unwrap();
//! assert!(remote.on_or_after(&Version::new(6, 3, 0)));
//! assert!("6.3.0-rc1".parse::<Version>().unwrap() < Version::new(6, 3, 0));
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::error::{GateError, Result};

static VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\.(\d+)\.(\d+)(?:-(alpha|beta|rc)(\d+))?(?:-SNAPSHOT)?$").unwrap()
});

/// Pre-release stage of a version.
///
/// Variant order is the ordering tie-break after the numeric components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Alpha(u32),
    Beta(u32),
    Rc(u32),
    Release,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Alpha(n) => write!(f, "alpha{}", n),
            Stage::Beta(n) => write!(f, "beta{}", n),
            Stage::Rc(n) => write!(f, "rc{}", n),
            Stage::Release => Ok(()),
        }
    }
}

/// A cluster version with a total, component-wise numeric order.
///
/// Field order matters: the derived `Ord` compares major, then minor, then
/// revision, then stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    major: u32,
    minor: u32,
    revision: u32,
    stage: Stage,
}

impl Version {
    /// Create a release version.
    pub const fn new(major: u32, minor: u32, revision: u32) -> Self {
        Self {
            major,
            minor,
            revision,
            stage: Stage::Release,
        }
    }

    /// Create a version with an explicit pre-release stage.
    pub const fn with_stage(major: u32, minor: u32, revision: u32, stage: Stage) -> Self {
        Self {
            major,
            minor,
            revision,
            stage,
        }
    }

    /// Parse a version string, trimming surrounding whitespace.
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = || GateError::InvalidVersion {
            input: input.to_string(),
        };

        let caps = VERSION_REGEX.captures(input.trim()).ok_or_else(invalid)?;
        let number = |idx: usize| -> Result<u32> {
            caps.get(idx)
                .map(|m| m.as_str())
                .ok_or_else(invalid)?
                .parse()
                .map_err(|_| invalid())
        };

        let stage = match caps.get(4).map(|m| m.as_str()) {
            None => Stage::Release,
            Some("alpha") => Stage::Alpha(number(5)?),
            Some("beta") => Stage::Beta(number(5)?),
            Some("rc") => Stage::Rc(number(5)?),
            Some(_) => return Err(invalid()),
        };

        Ok(Self {
            major: number(1)?,
            minor: number(2)?,
            revision: number(3)?,
            stage,
        })
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    pub fn minor(&self) -> u32 {
        self.minor
    }

    pub fn revision(&self) -> u32 {
        self.revision
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Whether this is a release (not alpha, beta or rc).
    pub fn is_release(&self) -> bool {
        self.stage == Stage::Release
    }

    /// `self >= other`.
    pub fn on_or_after(&self, other: &Version) -> bool {
        self >= other
    }

    /// `self < other`.
    pub fn before(&self, other: &Version) -> bool {
        self < other
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.revision)?;
        if !self.is_release() {
            write!(f, "-{}", self.stage)?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = GateError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Version {
    type Error = GateError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Version> for String {
    fn from(version: Version) -> Self {
        version.to_string()
    }
}
