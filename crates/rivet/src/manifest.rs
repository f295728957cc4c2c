// SPDX-FileCopyrightText: 2026 Rivet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `build.toml` build manifest.
//!
//! ```toml
//! plugins = ["org.openrewrite.build.recipe-library"]
//! dependencies = ["org.yaml:snakeyaml:1.+"]
//!
//! [[rule]]
//! kind = "pin"
//! group = "org.yaml"
//! artifact = "snakeyaml"
//! version = "2.2"
//!
//! [[constraint]]
//! module = "com.google.guava:guava:32.0.0-jre"
//! because = "CVE-2023-2976"
//!
//! [available]
//! "org.yaml:snakeyaml" = ["1.33", "2.2"]
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use rivet_core::{Coordinate, RivetError};
use rivet_plugin::{PluginRegistry, PluginTable, builtin_catalog};
use rivet_resolve::{ConstraintTable, OverrideRule, RuleTable, VersionCatalog, VersionConstraint};
use serde::Deserialize;

/// Parsed `build.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildManifest {
    /// Project-local plugin descriptors, registered next to the built-ins.
    #[serde(default, rename = "plugin")]
    pub extra_plugins: Vec<PluginTable>,

    /// Plugin ids the build applies.
    #[serde(default)]
    pub plugins: Vec<String>,

    /// Requested `group:artifact:version` coordinates.
    #[serde(default)]
    pub dependencies: Vec<String>,

    /// Override rules, in declaration order.
    #[serde(default, rename = "rule")]
    pub rules: Vec<RuleTable>,

    #[serde(default, rename = "constraint")]
    pub constraints: Vec<ConstraintTable>,

    /// Versions available per `group:artifact`, for dynamic selection.
    #[serde(default)]
    pub available: BTreeMap<String, Vec<String>>,
}

impl BuildManifest {
    pub fn parse(toml_content: &str) -> Result<Self, RivetError> {
        toml::from_str(toml_content).map_err(|e| RivetError::Manifest(format!("invalid build manifest: {e}")))
    }

    pub fn load(path: &Path) -> Result<Self, RivetError> {
        let content = std::fs::read_to_string(path).map_err(|e| RivetError::io(path, e))?;
        Self::parse(&content)
    }

    /// Built-in catalog plus this manifest's plugins.
    pub fn registry(&self) -> Result<PluginRegistry, RivetError> {
        let mut registry = PluginRegistry::with_plugins(builtin_catalog())?;
        for table in &self.extra_plugins {
            registry.register(table.clone().into_descriptor()?)?;
        }
        Ok(registry)
    }

    pub fn requests(&self) -> Result<Vec<Coordinate>, RivetError> {
        self.dependencies.iter().map(|d| d.parse()).collect()
    }

    pub fn override_rules(&self) -> Result<Vec<OverrideRule>, RivetError> {
        self.rules.iter().cloned().map(RuleTable::into_rule).collect()
    }

    pub fn version_constraints(&self) -> Result<Vec<VersionConstraint>, RivetError> {
        self.constraints
            .iter()
            .cloned()
            .map(ConstraintTable::into_constraint)
            .collect()
    }

    /// The available-versions catalog, or `None` when the manifest lists none.
    pub fn catalog(&self) -> Result<Option<VersionCatalog>, RivetError> {
        if self.available.is_empty() {
            return Ok(None);
        }
        VersionCatalog::from_entries(self.available.clone()).map(Some)
    }
}
