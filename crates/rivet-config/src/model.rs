// SPDX-FileCopyrightText: 2026 Rivet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model.
//!
//! Every struct rejects unknown keys so typos surface as diagnostics with a
//! suggestion instead of being silently ignored.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::str::FromStr;

use rivet_audit::{DEFAULT_FAIL_ON_CVSS, ReportFormat};
use rivet_core::RivetError;
use rivet_license::{CommentStyle, DEFAULT_EXCLUDES, HeaderTemplate, StyleMapping};
use serde::{Deserialize, Serialize};

/// Top-level Rivet configuration. All sections are optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RivetConfig {
    #[serde(default)]
    pub log: LogConfig,

    #[serde(default)]
    pub resolution: ResolutionConfig,

    #[serde(default)]
    pub license: LicenseConfig,

    #[serde(default)]
    pub audit: AuditConfig,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// One of trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Dependency resolution settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ResolutionConfig {
    /// How long resolved coordinates stay cached within one invocation.
    /// Zero disables caching.
    #[serde(default)]
    pub cache_duration_secs: u64,
}

/// Header template used when none is configured, relative to the project root.
pub const DEFAULT_HEADER_FILE: &str = "gradle/licenseHeader.txt";

/// License header settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LicenseConfig {
    /// Path to the header template file.
    #[serde(default = "default_header_file")]
    pub header_file: Option<PathBuf>,

    /// Inline header template. Takes precedence over `header_file`.
    #[serde(default)]
    pub header: Option<String>,

    /// Year substituted into the template. Defaults to the current year.
    #[serde(default)]
    pub year: Option<i32>,

    #[serde(default = "default_true")]
    pub skip_existing_headers: bool,

    #[serde(default = "default_true")]
    pub strict_check: bool,

    /// Glob patterns of files that never get a header.
    #[serde(default = "default_excludes")]
    pub exclude: Vec<String>,

    /// Extra extension to comment style entries, e.g. `vue = "XML_STYLE"`.
    #[serde(default)]
    pub mapping: BTreeMap<String, String>,
}

impl Default for LicenseConfig {
    fn default() -> Self {
        Self {
            header_file: default_header_file(),
            header: None,
            year: None,
            skip_existing_headers: true,
            strict_check: true,
            exclude: default_excludes(),
            mapping: BTreeMap::new(),
        }
    }
}

impl LicenseConfig {
    /// Load the header template: the inline text when set, otherwise the
    /// header file.
    pub fn template(&self) -> Result<HeaderTemplate, RivetError> {
        match (&self.header, &self.header_file) {
            (Some(text), _) => HeaderTemplate::new(text.as_str()),
            (None, Some(path)) => HeaderTemplate::from_file(path),
            (None, None) => Err(RivetError::MissingHeaderTemplate { path: None }),
        }
    }

    /// The default style mapping extended with the configured entries.
    /// Entries with an unknown style name are skipped; validation reports them.
    pub fn style_mapping(&self) -> StyleMapping {
        let mut styles = StyleMapping::default();
        for (ext, name) in &self.mapping {
            if let Ok(style) = CommentStyle::from_str(name) {
                styles.insert(ext.as_str(), style);
            }
        }
        styles
    }
}

fn default_header_file() -> Option<PathBuf> {
    Some(PathBuf::from(DEFAULT_HEADER_FILE))
}

fn default_true() -> bool {
    true
}

fn default_excludes() -> Vec<String> {
    DEFAULT_EXCLUDES.iter().map(|p| p.to_string()).collect()
}

/// Vulnerability audit settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    /// Fail when any finding scores at or above this CVSS value.
    #[serde(default = "default_fail_on_cvss")]
    pub fail_on_cvss: f32,

    /// Report format: HTML, JSON, CSV, XML or ALL.
    #[serde(default = "default_format")]
    pub format: String,

    /// NVD API key. Kept as plain text only until it is wrapped for use.
    #[serde(default)]
    pub nvd_api_key: Option<String>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            fail_on_cvss: default_fail_on_cvss(),
            format: default_format(),
            nvd_api_key: None,
        }
    }
}

impl AuditConfig {
    /// Parsed report format, falling back to HTML for unrecognized names.
    pub fn report_format(&self) -> ReportFormat {
        ReportFormat::from_str(self.format.trim()).unwrap_or_default()
    }
}

fn default_fail_on_cvss() -> f32 {
    DEFAULT_FAIL_ON_CVSS
}

fn default_format() -> String {
    ReportFormat::default().to_string()
}
