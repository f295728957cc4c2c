// SPDX-FileCopyrightText: 2026 Rivet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Semantic checks run after deserialization.
//!
//! Every problem is collected so one run reports all of them.

use std::str::FromStr;

use rivet_audit::ReportFormat;
use rivet_license::{CommentStyle, ExclusionSet};

use crate::diagnostic::ConfigError;
use crate::model::RivetConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate `config`, returning all collected errors.
pub fn validate_config(config: &RivetConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.log.level.to_ascii_lowercase().as_str()) {
        errors.push(ConfigError::InvalidValue {
            key: "log.level".to_string(),
            message: format!("unknown level `{}`", config.log.level),
            help: format!("use one of {}", LOG_LEVELS.join(", ")),
        });
    }

    let cvss = config.audit.fail_on_cvss;
    if !cvss.is_finite() || !(0.0..=10.0).contains(&cvss) {
        errors.push(ConfigError::InvalidValue {
            key: "audit.fail_on_cvss".to_string(),
            message: format!("{cvss} is outside the CVSS range"),
            help: "use a score between 0.0 and 10.0".to_string(),
        });
    }

    if ReportFormat::from_str(config.audit.format.trim()).is_err() {
        errors.push(ConfigError::InvalidValue {
            key: "audit.format".to_string(),
            message: format!("unknown report format `{}`", config.audit.format),
            help: "use one of HTML, JSON, CSV, XML, ALL".to_string(),
        });
    }

    for pattern in &config.license.exclude {
        if let Err(e) = ExclusionSet::new([pattern]) {
            errors.push(ConfigError::InvalidValue {
                key: "license.exclude".to_string(),
                message: e.to_string(),
                help: "patterns use glob syntax, e.g. `**/*.md`".to_string(),
            });
        }
    }

    for (ext, style) in &config.license.mapping {
        if CommentStyle::from_str(style).is_err() {
            errors.push(ConfigError::InvalidValue {
                key: format!("license.mapping.{ext}"),
                message: format!("unknown comment style `{style}`"),
                help: "use one of SLASHSTAR_STYLE, SCRIPT_STYLE, XML_STYLE".to_string(),
            });
        }
    }

    if let Some(year) = config.license.year
        && year <= 0
    {
        errors.push(ConfigError::InvalidValue {
            key: "license.year".to_string(),
            message: format!("{year} is not a calendar year"),
            help: "leave unset to use the current year".to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
