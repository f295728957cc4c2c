// SPDX-FileCopyrightText: 2026 Rivet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Override rules and version constraints.
//!
//! Rules are kept in declaration order. [`RuleTable`] and
//! [`ConstraintTable`] are the TOML shapes used by build manifests; both
//! validate into the typed forms here.

use rivet_core::{Coordinate, ModuleKey, RivetError, VersionSpec};
use serde::Deserialize;
use strum::{Display, EnumString};

/// Artifact wildcard matching every artifact in a group.
pub const ANY_ARTIFACT: &str = "*";

/// Which requested coordinates a rule applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleSelector {
    pub group: String,
    /// Artifact name, or `*` for the whole group.
    pub artifact: String,
    /// Only match when the requested version text starts with this prefix.
    pub version_prefix: Option<String>,
}

impl ModuleSelector {
    pub fn new(group: impl Into<String>, artifact: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
            version_prefix: None,
        }
    }

    /// Restrict the selector to requested versions starting with `prefix`.
    pub fn when_version_starts_with(mut self, prefix: impl Into<String>) -> Self {
        self.version_prefix = Some(prefix.into());
        self
    }

    pub fn matches(&self, requested: &Coordinate) -> bool {
        if self.group != requested.group {
            return false;
        }
        if self.artifact != ANY_ARTIFACT && self.artifact != requested.artifact {
            return false;
        }
        match &self.version_prefix {
            Some(prefix) => requested.version.to_string().starts_with(prefix.as_str()),
            None => true,
        }
    }
}

/// One override rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverrideRule {
    /// Force an exact version.
    Pin {
        selector: ModuleSelector,
        version: String,
        because: Option<String>,
    },
    /// Drop the dependency entirely.
    Exclude {
        selector: ModuleSelector,
        because: Option<String>,
    },
    /// Replace the whole coordinate.
    Substitute {
        selector: ModuleSelector,
        replacement: Coordinate,
        because: Option<String>,
    },
}

impl OverrideRule {
    pub fn pin(group: &str, artifact: &str, version: &str) -> Self {
        OverrideRule::Pin {
            selector: ModuleSelector::new(group, artifact),
            version: version.to_string(),
            because: None,
        }
    }

    pub fn exclude(group: &str, artifact: &str) -> Self {
        OverrideRule::Exclude {
            selector: ModuleSelector::new(group, artifact),
            because: None,
        }
    }

    pub fn substitute(group: &str, artifact: &str, replacement: Coordinate) -> Self {
        OverrideRule::Substitute {
            selector: ModuleSelector::new(group, artifact),
            replacement,
            because: None,
        }
    }

    pub fn selector(&self) -> &ModuleSelector {
        match self {
            OverrideRule::Pin { selector, .. }
            | OverrideRule::Exclude { selector, .. }
            | OverrideRule::Substitute { selector, .. } => selector,
        }
    }

    pub fn because(&self) -> Option<&str> {
        match self {
            OverrideRule::Pin { because, .. }
            | OverrideRule::Exclude { because, .. }
            | OverrideRule::Substitute { because, .. } => because.as_deref(),
        }
    }

    pub fn kind(&self) -> RuleKind {
        match self {
            OverrideRule::Pin { .. } => RuleKind::Pin,
            OverrideRule::Exclude { .. } => RuleKind::Exclude,
            OverrideRule::Substitute { .. } => RuleKind::Substitute,
        }
    }
}

/// Discriminant of an [`OverrideRule`], as written in manifests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    Pin,
    Exclude,
    Substitute,
}

/// Lower bound on a module's resolved version.
///
/// Applied after override rules: a resolved exact version below `minimum`
/// is raised to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionConstraint {
    pub module: ModuleKey,
    pub minimum: String,
    pub because: Option<String>,
}

/// A `[[rule]]` table from a build manifest.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleTable {
    pub kind: RuleKind,
    pub group: String,
    #[serde(default = "default_artifact")]
    pub artifact: String,
    #[serde(default)]
    pub version_prefix: Option<String>,
    /// Pin target version.
    #[serde(default)]
    pub version: Option<String>,
    /// Substitute replacement, as `group:artifact:version`.
    #[serde(default)]
    pub with: Option<String>,
    #[serde(default)]
    pub because: Option<String>,
}

fn default_artifact() -> String {
    ANY_ARTIFACT.to_string()
}

impl RuleTable {
    /// Validate the table and turn it into a rule.
    pub fn into_rule(self) -> Result<OverrideRule, RivetError> {
        if self.group.trim().is_empty() {
            return Err(RivetError::Manifest(format!("{} rule: group must not be empty", self.kind)));
        }
        let target = format!("{}:{}", self.group, self.artifact);
        let selector = ModuleSelector {
            group: self.group,
            artifact: self.artifact,
            version_prefix: self.version_prefix,
        };

        match self.kind {
            RuleKind::Pin => {
                if self.with.is_some() {
                    return Err(RivetError::Manifest(format!("pin rule for {target}: `with` is only valid on substitute rules")));
                }
                let version = self.version.ok_or_else(|| {
                    RivetError::Manifest(format!("pin rule for {target}: missing `version`"))
                })?;
                match VersionSpec::parse(&version) {
                    Ok(VersionSpec::Exact(v)) => Ok(OverrideRule::Pin {
                        selector,
                        version: v,
                        because: self.because,
                    }),
                    Ok(_) => Err(RivetError::Manifest(format!(
                        "pin rule for {target}: `{version}` is not an exact version"
                    ))),
                    Err(reason) => Err(RivetError::Manifest(format!("pin rule for {target}: {reason}"))),
                }
            }
            RuleKind::Exclude => {
                if self.version.is_some() || self.with.is_some() {
                    return Err(RivetError::Manifest(format!(
                        "exclude rule for {target}: takes no `version` or `with`"
                    )));
                }
                Ok(OverrideRule::Exclude {
                    selector,
                    because: self.because,
                })
            }
            RuleKind::Substitute => {
                if self.version.is_some() {
                    return Err(RivetError::Manifest(format!("substitute rule for {target}: use `with`, not `version`")));
                }
                let with = self.with.ok_or_else(|| {
                    RivetError::Manifest(format!("substitute rule for {target}: missing `with`"))
                })?;
                Ok(OverrideRule::Substitute {
                    selector,
                    replacement: with.parse()?,
                    because: self.because,
                })
            }
        }
    }
}

/// A `[[constraint]]` table from a build manifest.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConstraintTable {
    /// `group:artifact:minimum`
    pub module: String,
    #[serde(default)]
    pub because: Option<String>,
}

impl ConstraintTable {
    pub fn into_constraint(self) -> Result<VersionConstraint, RivetError> {
        let coordinate: Coordinate = self.module.parse()?;
        let VersionSpec::Exact(minimum) = coordinate.version.clone() else {
            return Err(RivetError::Manifest(format!(
                "constraint `{}`: minimum must be an exact version",
                self.module
            )));
        };
        Ok(VersionConstraint {
            module: coordinate.key(),
            minimum,
            because: self.because,
        })
    }
}
