// SPDX-FileCopyrightText: 2026 Rivet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Rivet build toolkit.

use std::path::PathBuf;

use thiserror::Error;

/// The primary error type returned by registry, resolver, annotator and audit operations.
///
/// Every variant is a configuration error rather than a transient condition, so
/// callers surface them immediately instead of retrying.
#[derive(Debug, Error)]
pub enum RivetError {
    /// A plugin identifier was requested that no registry entry carries.
    #[error("unknown plugin `{id}`")]
    UnknownPlugin { id: String },

    /// A plugin identifier was registered twice.
    #[error("plugin `{id}` is already registered")]
    DuplicateIdentifier { id: String },

    /// Plugin `applies` references loop back on themselves.
    #[error("plugin application cycle: {}", chain.join(" -> "))]
    PluginCycle { chain: Vec<String> },

    /// A plugin identifier failed validation.
    #[error("invalid plugin identifier `{id}`: {reason}")]
    InvalidIdentifier { id: String, reason: String },

    /// A `group:artifact:version` string could not be parsed.
    #[error("invalid dependency coordinate `{input}`: {reason}")]
    InvalidCoordinate { input: String, reason: String },

    /// An exclude rule removed the requested dependency.
    #[error("dependency {group}:{artifact} is excluded")]
    DependencyExcluded { group: String, artifact: String },

    /// A dynamic version spec is malformed or matches no available version.
    #[error("cannot resolve version `{spec}` for {group}:{artifact}: {reason}")]
    UnresolvableVersionRange {
        group: String,
        artifact: String,
        spec: String,
        reason: String,
    },

    /// No usable license header template was supplied.
    #[error("missing license header template{}", path.as_ref().map(|p| format!(" at {}", p.display())).unwrap_or_default())]
    MissingHeaderTemplate { path: Option<PathBuf> },

    /// A header check found files without the expected header.
    #[error("{count} file(s) missing the license header")]
    MissingLicenseHeaders { count: usize },

    /// At least one vulnerability finding met the failure threshold.
    #[error("{count} finding(s) at or above CVSS {threshold} (highest {highest})")]
    VulnerabilityThreshold {
        count: usize,
        threshold: f32,
        highest: f32,
    },

    /// Configuration errors (invalid TOML, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Build manifest errors (unparseable `build.toml`, bad rule tables).
    #[error("manifest error: {0}")]
    Manifest(String),

    /// File system errors while reading or writing artifacts.
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl RivetError {
    /// Process exit code for this failure kind. Each kind gets its own code.
    pub fn exit_code(&self) -> i32 {
        match self {
            RivetError::Config(_) => 2,
            RivetError::Io { .. } => 3,
            RivetError::Manifest(_) => 4,
            RivetError::InvalidIdentifier { .. } => 5,
            RivetError::InvalidCoordinate { .. } => 6,
            RivetError::UnknownPlugin { .. } => 10,
            RivetError::DuplicateIdentifier { .. } => 11,
            RivetError::PluginCycle { .. } => 12,
            RivetError::DependencyExcluded { .. } => 20,
            RivetError::UnresolvableVersionRange { .. } => 21,
            RivetError::MissingHeaderTemplate { .. } => 30,
            RivetError::MissingLicenseHeaders { .. } => 31,
            RivetError::VulnerabilityThreshold { .. } => 40,
        }
    }

    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RivetError::Io {
            path: path.into(),
            source,
        }
    }
}
