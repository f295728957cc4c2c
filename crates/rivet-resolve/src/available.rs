// SPDX-FileCopyrightText: 2026 Rivet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Known available versions per module, used to pin down dynamic specs.

use std::collections::HashMap;

use rivet_core::{ModuleKey, RivetError};

/// Available versions keyed by `(group, artifact)`.
#[derive(Debug, Clone, Default)]
pub struct VersionCatalog {
    modules: HashMap<ModuleKey, Vec<String>>,
}

impl VersionCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add versions for a module, appending to any already known.
    pub fn add<I, S>(&mut self, module: ModuleKey, versions: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let known = self.modules.entry(module).or_default();
        for v in versions {
            let v = v.into();
            if !known.contains(&v) {
                known.push(v);
            }
        }
    }

    /// Build a catalog from `"group:artifact" -> versions` pairs.
    pub fn from_entries<I>(entries: I) -> Result<Self, RivetError>
    where
        I: IntoIterator<Item = (String, Vec<String>)>,
    {
        let mut catalog = Self::new();
        for (key, versions) in entries {
            catalog.add(key.parse()?, versions);
        }
        Ok(catalog)
    }

    pub fn versions(&self, module: &ModuleKey) -> &[String] {
        self.modules.get(module).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
