// SPDX-FileCopyrightText: 2026 Rivet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Identifier types shared by the registry and the build manifest.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RivetError;

/// A dot-separated, namespaced plugin identifier such as `org.example.build.root`.
///
/// Identifiers need at least two segments, and every segment is made of ASCII
/// alphanumerics, `-` or `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PluginId(String);

impl PluginId {
    /// Parse and validate an identifier.
    pub fn new(id: impl Into<String>) -> Result<Self, RivetError> {
        let id = id.into();
        let invalid = |reason: &str| RivetError::InvalidIdentifier {
            id: id.clone(),
            reason: reason.to_string(),
        };

        if id.is_empty() {
            return Err(invalid("identifier must not be empty"));
        }
        let segments: Vec<&str> = id.split('.').collect();
        if segments.len() < 2 {
            return Err(invalid("identifier must be namespaced (e.g. `org.example.name`)"));
        }
        if segments.iter().any(|s| s.is_empty()) {
            return Err(invalid("identifier contains an empty segment"));
        }
        if let Some(bad) = segments.iter().find(|s| {
            !s.chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        }) {
            return Err(invalid(&format!("segment `{bad}` contains invalid characters")));
        }

        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The last segment, e.g. `root` for `org.example.build.root`.
    pub fn short_name(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for PluginId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PluginId {
    type Err = RivetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for PluginId {
    type Error = RivetError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PluginId> for String {
    fn from(id: PluginId) -> Self {
        id.0
    }
}

/// Opaque reference to the code that implements a plugin.
///
/// The registry hands this back unchanged; it never interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImplementationBinding(pub String);

impl fmt::Display for ImplementationBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
