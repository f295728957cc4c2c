// SPDX-FileCopyrightText: 2026 Rivet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `group:artifact:version` dependency coordinates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RivetError;
use crate::version::VersionSpec;

/// The `(group, artifact)` pair that override rules and version catalogs key on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModuleKey {
    pub group: String,
    pub artifact: String,
}

impl ModuleKey {
    pub fn new(group: impl Into<String>, artifact: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
        }
    }
}

impl fmt::Display for ModuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.artifact)
    }
}

impl FromStr for ModuleKey {
    type Err = RivetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| RivetError::InvalidCoordinate {
            input: s.to_string(),
            reason: reason.to_string(),
        };
        let (group, artifact) = s
            .split_once(':')
            .ok_or_else(|| invalid("expected `group:artifact`"))?;
        if group.is_empty() || artifact.is_empty() || artifact.contains(':') {
            return Err(invalid("expected `group:artifact`"));
        }
        Ok(Self::new(group, artifact))
    }
}

/// A library coordinate. Requested coordinates are never mutated; resolution
/// produces new values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Coordinate {
    pub group: String,
    pub artifact: String,
    pub version: VersionSpec,
}

impl Coordinate {
    pub fn new(group: impl Into<String>, artifact: impl Into<String>, version: VersionSpec) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
            version,
        }
    }

    pub fn key(&self) -> ModuleKey {
        ModuleKey::new(&self.group, &self.artifact)
    }

    /// Same module, different version.
    pub fn with_version(&self, version: VersionSpec) -> Self {
        Self {
            group: self.group.clone(),
            artifact: self.artifact.clone(),
            version,
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.artifact, self.version)
    }
}

impl FromStr for Coordinate {
    type Err = RivetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: String| RivetError::InvalidCoordinate {
            input: s.to_string(),
            reason,
        };

        let mut pieces = s.trim().splitn(3, ':');
        let (Some(group), Some(artifact), Some(version)) = (pieces.next(), pieces.next(), pieces.next())
        else {
            return Err(invalid("expected `group:artifact:version`".to_string()));
        };
        if group.is_empty() || artifact.is_empty() {
            return Err(invalid("group and artifact must not be empty".to_string()));
        }

        let version = VersionSpec::parse(version).map_err(|reason| RivetError::UnresolvableVersionRange {
            group: group.to_string(),
            artifact: artifact.to_string(),
            spec: version.to_string(),
            reason,
        })?;

        Ok(Self::new(group, artifact, version))
    }
}

impl TryFrom<String> for Coordinate {
    type Error = RivetError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Coordinate> for String {
    fn from(c: Coordinate) -> Self {
        c.to_string()
    }
}
