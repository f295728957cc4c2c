// SPDX-FileCopyrightText: 2026 Rivet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for the Rivet toolkit.
//!
//! TOML files and environment variables are layered with Figment, every
//! table rejects unknown keys, and failures come back as miette diagnostics
//! with typo suggestions.

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::Path;

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{AuditConfig, DEFAULT_HEADER_FILE, LicenseConfig, LogConfig, ResolutionConfig, RivetConfig};

/// Load from the standard hierarchy and validate.
pub fn load_and_validate() -> Result<RivetConfig, Vec<ConfigError>> {
    finish(loader::load_config(), || collect_toml_sources(Path::new(loader::LOCAL_CONFIG_FILE)))
}

/// Load with an explicit local config file and validate.
pub fn load_and_validate_path(path: &Path) -> Result<RivetConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_path(path), || collect_toml_sources(path))
}

/// Load defaults plus `toml_content` and validate.
pub fn load_and_validate_str(toml_content: &str) -> Result<RivetConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_str(toml_content), || {
        vec![("<inline>".to_string(), toml_content.to_string())]
    })
}

fn finish(
    loaded: Result<RivetConfig, figment::Error>,
    sources: impl FnOnce() -> Vec<(String, String)>,
) -> Result<RivetConfig, Vec<ConfigError>> {
    match loaded {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err, &sources())),
    }
}

/// Read the config files that exist, for span lookup in diagnostics.
///
/// Paths are recorded exactly as Figment reports them.
fn collect_toml_sources(local: &Path) -> Vec<(String, String)> {
    let local = std::env::current_dir()
        .map(|d| d.join(local))
        .unwrap_or_else(|_| local.to_path_buf());
    [
        Some(local),
        loader::user_config_path(),
        Some(Path::new(loader::SYSTEM_CONFIG_PATH).to_path_buf()),
    ]
    .into_iter()
    .flatten()
    .filter_map(|path| {
        std::fs::read_to_string(&path)
            .ok()
            .map(|content| (path.display().to_string(), content))
    })
    .collect()
}
