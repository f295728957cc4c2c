// SPDX-FileCopyrightText: 2026 Rivet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin descriptors and their TOML form.
//!
//! A manifest holds a `[[plugin]]` array; each table becomes one
//! [`PluginDescriptor`]. Identifiers are validated while parsing, so a
//! descriptor that exists is always registrable by shape.

use std::collections::BTreeSet;

use rivet_core::{ImplementationBinding, PluginId, RivetError};
use serde::{Deserialize, Serialize};

/// Describes one registrable build plugin.
///
/// Descriptors are immutable after construction; the registry stores them
/// as given and returns them unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginDescriptor {
    /// Unique namespaced identifier (e.g., "org.openrewrite.build.root").
    pub id: PluginId,
    /// Human-readable name.
    pub display_name: String,
    /// Longer description of what applying the plugin configures.
    pub description: String,
    /// Opaque reference to the implementation.
    pub binding: ImplementationBinding,
    /// Free-form tags (e.g., ["rewrite", "oss"]).
    pub tags: BTreeSet<String>,
    /// Other plugins applied before this one, in declaration order.
    pub applies: Vec<PluginId>,
}

impl PluginDescriptor {
    /// Build a descriptor with no tags and no applied plugins.
    pub fn new(
        id: PluginId,
        display_name: impl Into<String>,
        description: impl Into<String>,
        binding: impl Into<String>,
    ) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            description: description.into(),
            binding: ImplementationBinding(binding.into()),
            tags: BTreeSet::new(),
            applies: Vec::new(),
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_applies(mut self, applies: Vec<PluginId>) -> Self {
        self.applies = applies;
        self
    }
}

/// Intermediate TOML deserialization struct for a plugin manifest.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestFile {
    #[serde(default)]
    plugin: Vec<PluginTable>,
}

/// One `[[plugin]]` table, before validation.
///
/// Public so that larger documents (such as a build manifest) can embed the
/// same table shape.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PluginTable {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    pub implementation: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub applies: Vec<String>,
}

/// Parse the `[[plugin]]` tables of a manifest.
///
/// Validates that every id (including those under `applies`) is a well-formed
/// namespaced identifier and that display names and implementations are
/// non-empty. Duplicate ids are left for the registry to reject.
pub fn parse_plugin_manifest(toml_content: &str) -> Result<Vec<PluginDescriptor>, RivetError> {
    let file: ManifestFile = toml::from_str(toml_content)
        .map_err(|e| RivetError::Manifest(format!("invalid plugin manifest: {e}")))?;

    file.plugin.into_iter().map(PluginTable::into_descriptor).collect()
}

impl PluginTable {
    /// Validate the table and turn it into a descriptor.
    pub fn into_descriptor(self) -> Result<PluginDescriptor, RivetError> {
        let id = PluginId::new(self.id)?;

        if self.display_name.trim().is_empty() {
            return Err(RivetError::Manifest(format!(
                "plugin `{id}`: display_name must not be empty"
            )));
        }
        if self.implementation.trim().is_empty() {
            return Err(RivetError::Manifest(format!(
                "plugin `{id}`: implementation must not be empty"
            )));
        }

        let applies = self
            .applies
            .into_iter()
            .map(PluginId::new)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(
            PluginDescriptor::new(id, self.display_name, self.description, self.implementation)
                .with_tags(self.tags)
                .with_applies(applies),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_manifest() {
        let toml = r#"
[[plugin]]
id = "org.example.build.custom"
display_name = "Custom build"
description = "Adds the custom conventions"
implementation = "com.example.CustomPlugin"
tags = ["rewrite", "oss"]
applies = ["org.openrewrite.build.java-base"]
"#;
        let plugins = parse_plugin_manifest(toml).unwrap();
        assert_eq!(plugins.len(), 1);
        let p = &plugins[0];
        assert_eq!(p.id.as_str(), "org.example.build.custom");
        assert_eq!(p.display_name, "Custom build");
        assert_eq!(p.binding.0, "com.example.CustomPlugin");
        assert!(p.tags.contains("oss"));
        assert_eq!(p.applies[0].as_str(), "org.openrewrite.build.java-base");
    }

    #[test]
    fn parse_minimal_manifest() {
        let toml = r#"
[[plugin]]
id = "x.y"
display_name = "X"
implementation = "XPlugin"
"#;
        let plugins = parse_plugin_manifest(toml).unwrap();
        assert!(plugins[0].description.is_empty());
        assert!(plugins[0].tags.is_empty());
        assert!(plugins[0].applies.is_empty());
    }

    #[test]
    fn empty_manifest_has_no_plugins() {
        assert!(parse_plugin_manifest("").unwrap().is_empty());
    }

    #[test]
    fn parse_rejects_bad_identifier() {
        let toml = r#"
[[plugin]]
id = "custom"
display_name = "Custom"
implementation = "CustomPlugin"
"#;
        let err = parse_plugin_manifest(toml).unwrap_err();
        assert!(matches!(err, RivetError::InvalidIdentifier { .. }));
    }

    #[test]
    fn parse_rejects_bad_applies_identifier() {
        let toml = r#"
[[plugin]]
id = "org.example.custom"
display_name = "Custom"
implementation = "CustomPlugin"
applies = ["not namespaced"]
"#;
        assert!(parse_plugin_manifest(toml).is_err());
    }

    #[test]
    fn parse_rejects_empty_display_name() {
        let toml = r#"
[[plugin]]
id = "org.example.custom"
display_name = " "
implementation = "CustomPlugin"
"#;
        let err = parse_plugin_manifest(toml).unwrap_err().to_string();
        assert!(err.contains("display_name must not be empty"));
    }

    #[test]
    fn parse_rejects_unknown_fields() {
        let toml = r#"
[[plugin]]
id = "org.example.custom"
display_name = "Custom"
implementation = "CustomPlugin"
implementationClass = "typo"
"#;
        let err = parse_plugin_manifest(toml).unwrap_err();
        assert!(matches!(err, RivetError::Manifest(_)));
    }
}
