// SPDX-FileCopyrightText: 2026 Rivet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered configuration loading with Figment.
//!
//! Later layers override earlier ones:
//! 1. compiled defaults
//! 2. `/etc/rivet/rivet.toml`
//! 3. `~/.config/rivet/rivet.toml`
//! 4. `./rivet.toml` (or an explicit path)
//! 5. `RIVET_*` environment variables
//! 6. the legacy `FAIL_BUILD_ON_CVSS`, `DEPENDENCY_CHECK_FORMAT` and `NVD_API_KEY` variables

#![allow(clippy::result_large_err)] // figment::Error is external

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::RivetConfig;

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/rivet/rivet.toml";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "rivet.toml";

/// Legacy variable names and the keys they set.
const LEGACY_ENV: &[(&str, &str)] = &[
    ("fail_build_on_cvss", "audit.fail_on_cvss"),
    ("dependency_check_format", "audit.format"),
    ("nvd_api_key", "audit.nvd_api_key"),
];

/// `~/.config/rivet/rivet.toml`, when a config directory exists.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("rivet").join(LOCAL_CONFIG_FILE))
}

/// Load from the standard file hierarchy plus environment overrides.
pub fn load_config() -> Result<RivetConfig, figment::Error> {
    build_figment(Path::new(LOCAL_CONFIG_FILE)).extract()
}

/// Load with `path` in place of `./rivet.toml`, keeping the other layers.
pub fn load_config_from_path(path: &Path) -> Result<RivetConfig, figment::Error> {
    build_figment(path).extract()
}

/// Load defaults plus a TOML string. No files, no environment.
pub fn load_config_from_str(toml_content: &str) -> Result<RivetConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(RivetConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// The full provider stack, before extraction.
pub fn build_figment(local: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(RivetConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(local))
        .merge(env_provider())
        .merge(legacy_env_provider())
}

/// `RIVET_*` variables, mapped section by section.
///
/// Uses `map()` rather than `split("_")` because key names contain
/// underscores: `RIVET_RESOLUTION_CACHE_DURATION_SECS` is
/// `resolution.cache_duration_secs`.
fn env_provider() -> Env {
    Env::prefixed("RIVET_").map(|key| {
        let key = key.as_str();
        let mapped = ["log", "resolution", "license", "audit"]
            .iter()
            .find_map(|section| {
                key.strip_prefix(section)
                    .and_then(|rest| rest.strip_prefix('_'))
                    .map(|rest| format!("{section}.{rest}"))
            })
            .unwrap_or_else(|| key.to_string());
        mapped.into()
    })
}

/// Unprefixed variables kept for compatibility with existing CI setups.
fn legacy_env_provider() -> Env {
    let names: Vec<&str> = LEGACY_ENV.iter().map(|(name, _)| *name).collect();
    Env::raw().only(&names).map(|key| {
        LEGACY_ENV
            .iter()
            .find(|(name, _)| key.as_str().eq_ignore_ascii_case(name))
            .map(|(_, target)| (*target).into())
            .unwrap_or_else(|| key.into())
    })
}
