// SPDX-FileCopyrightText: 2026 Rivet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Vulnerability findings supplied by the caller.

use std::path::Path;

use rivet_core::{Coordinate, RivetError};
use serde::{Deserialize, Serialize};
use strum::Display;

/// One reported vulnerability against a dependency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Finding {
    /// Advisory identifier, e.g. `CVE-2023-1234`.
    pub id: String,
    pub coordinate: Coordinate,
    /// CVSS base score, 0.0 to 10.0.
    pub cvss: f32,
    #[serde(default)]
    pub description: String,
}

impl Finding {
    pub fn severity(&self) -> Severity {
        Severity::from_score(self.cvss)
    }
}

/// CVSS v3 qualitative severity bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Severity {
    None,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn from_score(score: f32) -> Self {
        match score {
            s if s >= 9.0 => Severity::Critical,
            s if s >= 7.0 => Severity::High,
            s if s >= 4.0 => Severity::Medium,
            s if s > 0.0 => Severity::Low,
            _ => Severity::None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FindingsDocument {
    List(Vec<Finding>),
    Wrapped { findings: Vec<Finding> },
}

/// Parse findings from JSON: either a bare array or `{"findings": [...]}`.
///
/// Scores outside 0.0..=10.0 are rejected.
pub fn parse_findings(json: &str) -> Result<Vec<Finding>, RivetError> {
    let doc: FindingsDocument = serde_json::from_str(json)
        .map_err(|e| RivetError::Manifest(format!("invalid findings document: {e}")))?;
    let findings = match doc {
        FindingsDocument::List(findings) | FindingsDocument::Wrapped { findings } => findings,
    };

    if let Some(bad) = findings
        .iter()
        .find(|f| !f.cvss.is_finite() || !(0.0..=10.0).contains(&f.cvss))
    {
        return Err(RivetError::Manifest(format!(
            "finding {} has CVSS score {} outside 0.0..=10.0",
            bad.id, bad.cvss
        )));
    }
    Ok(findings)
}

/// Read and parse a findings file.
pub fn load_findings(path: &Path) -> Result<Vec<Finding>, RivetError> {
    let json = std::fs::read_to_string(path).map_err(|e| RivetError::io(path, e))?;
    parse_findings(&json)
}
