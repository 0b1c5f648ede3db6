//! Three-component schema version and its derived forms

use crate::error::{CoreError, CoreResult};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A `major.minor.patch` schema version.
///
/// Ordering compares major, then minor, then patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    /// Create a version from its components
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse `major.minor.patch`.
    ///
    /// Exactly three dot-separated components of ASCII digits are accepted.
    /// Signs, whitespace, empty components and values that overflow `u32`
    /// are rejected.
    pub fn parse(text: &str) -> CoreResult<Self> {
        let invalid = || CoreError::InvalidVersion {
            input: text.to_string(),
        };

        let mut parts = text.split('.');
        let mut next = || -> CoreResult<u32> {
            let part = parts.next().ok_or_else(invalid)?;
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            part.parse::<u32>().map_err(|_| invalid())
        };

        let version = Self::new(next()?, next()?, next()?);
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(version)
    }

    /// `major.minor`, used to name upgrade artifacts and changelog ids
    pub fn minor_form(&self) -> String {
        format!("{}.{}", self.major, self.minor)
    }

    /// Minor form without the separator, used as a fixture directory key
    pub fn minor_form_compact(&self) -> String {
        format!("{}{}", self.major, self.minor)
    }

    /// The default bump target: next minor, patch reset to zero
    pub fn propose_next(&self) -> CoreResult<Self> {
        let minor = self
            .minor
            .checked_add(1)
            .ok_or_else(|| CoreError::VersionOverflow {
                version: self.to_string(),
            })?;
        Ok(Self::new(self.major, minor, 0))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The versions involved in one bump
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VersionTriple {
    /// Version of record before the bump
    pub current: Version,
    /// Version before `current`; names the upgrade script that reached `current`
    pub previous: Version,
    /// Target version
    pub new: Version,
}

impl VersionTriple {
    /// Combine the three versions; `new` must be greater than `current`
    pub fn new(current: Version, previous: Version, new: Version) -> CoreResult<Self> {
        if new <= current {
            return Err(CoreError::VersionNotIncreasing {
                current: current.to_string(),
                new: new.to_string(),
            });
        }
        Ok(Self {
            current,
            previous,
            new,
        })
    }
}

#[cfg(test)]
#[path = "version_test.rs"]
mod tests;
