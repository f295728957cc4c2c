// SPDX-FileCopyrightText: 2026 Rivet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin registry mapping identifiers to descriptors.
//!
//! The `PluginRegistry` is an ordinary value owned by whoever drives the
//! build step; there is no process-wide registry. It never runs plugin
//! behavior. Lookups hand back the stored descriptor and its opaque binding.

use std::collections::{HashMap, HashSet};

use rivet_core::RivetError;
use tracing::debug;

use crate::manifest::PluginDescriptor;

/// Registry of build plugins keyed by identifier.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    entries: HashMap<String, PluginDescriptor>,
}

impl PluginRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Create a registry pre-loaded with the given descriptors.
    pub fn with_plugins(
        descriptors: impl IntoIterator<Item = PluginDescriptor>,
    ) -> Result<Self, RivetError> {
        let mut registry = Self::new();
        for descriptor in descriptors {
            registry.register(descriptor)?;
        }
        Ok(registry)
    }

    /// Register a descriptor.
    ///
    /// Fails with `DuplicateIdentifier` if the id is already present; the
    /// existing entry is left untouched.
    pub fn register(&mut self, descriptor: PluginDescriptor) -> Result<(), RivetError> {
        let id = descriptor.id.to_string();
        if self.entries.contains_key(&id) {
            return Err(RivetError::DuplicateIdentifier { id });
        }
        debug!(plugin = %id, binding = %descriptor.binding, "registered plugin");
        self.entries.insert(id, descriptor);
        Ok(())
    }

    /// Look up a descriptor by id.
    pub fn resolve(&self, id: &str) -> Result<&PluginDescriptor, RivetError> {
        self.entries
            .get(id)
            .ok_or_else(|| RivetError::UnknownPlugin { id: id.to_string() })
    }

    /// Returns true if the id is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Expand a plugin into everything applying it brings in.
    ///
    /// Depth-first over `applies`: each plugin appears after the plugins it
    /// applies, and only once. Unknown references fail with `UnknownPlugin`,
    /// loops with `PluginCycle`.
    pub fn application_order(&self, id: &str) -> Result<Vec<&PluginDescriptor>, RivetError> {
        self.application_order_all([id])
    }

    /// Expand several requested plugins into one de-duplicated order.
    pub fn application_order_all<'a, I>(&self, ids: I) -> Result<Vec<&PluginDescriptor>, RivetError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut order = Vec::new();
        let mut done = HashSet::new();
        let mut path = Vec::new();
        for id in ids {
            self.visit(id, &mut path, &mut done, &mut order)?;
        }
        Ok(order)
    }

    fn visit<'r>(
        &'r self,
        id: &str,
        path: &mut Vec<String>,
        done: &mut HashSet<String>,
        order: &mut Vec<&'r PluginDescriptor>,
    ) -> Result<(), RivetError> {
        if done.contains(id) {
            return Ok(());
        }
        if let Some(pos) = path.iter().position(|p| p == id) {
            let mut chain = path[pos..].to_vec();
            chain.push(id.to_string());
            return Err(RivetError::PluginCycle { chain });
        }

        let descriptor = self.resolve(id)?;
        path.push(id.to_string());
        for applied in &descriptor.applies {
            self.visit(applied.as_str(), path, done, order)?;
        }
        path.pop();

        done.insert(id.to_string());
        order.push(descriptor);
        Ok(())
    }

    /// List all descriptors, sorted by id.
    pub fn list_all(&self) -> Vec<&PluginDescriptor> {
        let mut entries: Vec<&PluginDescriptor> = self.entries.values().collect();
        entries.sort_by(|a, b| a.id.cmp(&b.id));
        entries
    }

    /// Case-insensitive search over id, display name, description and tags.
    ///
    /// An empty query returns everything. Results are sorted by id.
    pub fn search(&self, query: &str) -> Vec<&PluginDescriptor> {
        if query.is_empty() {
            return self.list_all();
        }
        let query = query.to_lowercase();
        self.list_all()
            .into_iter()
            .filter(|d| {
                d.id.as_str().to_lowercase().contains(&query)
                    || d.display_name.to_lowercase().contains(&query)
                    || d.description.to_lowercase().contains(&query)
                    || d.tags.iter().any(|t| t.to_lowercase() == query)
            })
            .collect()
    }

    /// Returns the number of registered plugins.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no plugins are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rivet_core::PluginId;

    fn descriptor(id: &str, applies: &[&str]) -> PluginDescriptor {
        PluginDescriptor::new(
            PluginId::new(id).unwrap(),
            format!("Plugin {id}"),
            format!("Test plugin {id}"),
            format!("impl::{id}"),
        )
        .with_applies(applies.iter().map(|a| PluginId::new(*a).unwrap()).collect())
    }

    fn ids(order: &[&PluginDescriptor]) -> Vec<String> {
        order.iter().map(|d| d.id.to_string()).collect()
    }

    #[test]
    fn register_and_resolve_roundtrip() {
        let mut registry = PluginRegistry::new();
        let d = PluginDescriptor::new(PluginId::new("x.y").unwrap(), "X", "", "XPlugin");
        registry.register(d.clone()).unwrap();

        assert_eq!(registry.resolve("x.y").unwrap(), &d);
        assert!(matches!(
            registry.resolve("x.z"),
            Err(RivetError::UnknownPlugin { id }) if id == "x.z"
        ));
    }

    #[test]
    fn duplicate_registration_fails_and_keeps_original() {
        let mut registry = PluginRegistry::new();
        registry.register(descriptor("a.one", &[])).unwrap();

        let mut replacement = descriptor("a.one", &[]);
        replacement.display_name = "Replacement".to_string();
        let err = registry.register(replacement).unwrap_err();

        assert!(matches!(err, RivetError::DuplicateIdentifier { ref id } if id == "a.one"));
        assert_eq!(registry.resolve("a.one").unwrap().display_name, "Plugin a.one");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn application_order_puts_dependencies_first_once() {
        let registry = PluginRegistry::with_plugins([
            descriptor("b.repos", &[]),
            descriptor("b.java", &["b.repos"]),
            descriptor("b.license", &[]),
            descriptor("b.library", &["b.repos", "b.java", "b.license"]),
        ])
        .unwrap();

        let order = registry.application_order("b.library").unwrap();
        assert_eq!(ids(&order), ["b.repos", "b.java", "b.license", "b.library"]);
    }

    #[test]
    fn application_order_all_deduplicates_across_requests() {
        let registry = PluginRegistry::with_plugins([
            descriptor("b.repos", &[]),
            descriptor("b.java", &["b.repos"]),
        ])
        .unwrap();

        let order = registry.application_order_all(["b.java", "b.repos"]).unwrap();
        assert_eq!(ids(&order), ["b.repos", "b.java"]);
    }

    #[test]
    fn application_order_detects_cycles() {
        let registry = PluginRegistry::with_plugins([
            descriptor("c.a", &["c.b"]),
            descriptor("c.b", &["c.a"]),
        ])
        .unwrap();

        let err = registry.application_order("c.a").unwrap_err();
        match err {
            RivetError::PluginCycle { chain } => assert_eq!(chain, ["c.a", "c.b", "c.a"]),
            other => panic!("expected cycle, got {other:?}"),
        }
    }

    #[test]
    fn application_order_reports_unknown_reference() {
        let registry = PluginRegistry::with_plugins([descriptor("d.a", &["d.missing"])]).unwrap();
        assert!(matches!(
            registry.application_order("d.a"),
            Err(RivetError::UnknownPlugin { id }) if id == "d.missing"
        ));
    }

    #[test]
    fn list_all_returns_sorted() {
        let registry = PluginRegistry::with_plugins([
            descriptor("z.zebra", &[]),
            descriptor("a.alpha", &[]),
            descriptor("m.middle", &[]),
        ])
        .unwrap();

        assert_eq!(ids(&registry.list_all()), ["a.alpha", "m.middle", "z.zebra"]);
    }

    #[test]
    fn search_matches_tags_and_text() {
        let registry = PluginRegistry::with_plugins([
            descriptor("s.one", &[]).with_tags(["oss"]),
            descriptor("s.two", &[]),
        ])
        .unwrap();

        assert_eq!(ids(&registry.search("OSS")), ["s.one"]);
        assert_eq!(ids(&registry.search("plugin s.two")), ["s.two"]);
        assert_eq!(registry.search("").len(), 2);
        assert!(registry.search("nothing-here").is_empty());
    }

    #[test]
    fn search_ignores_tag_case() {
        let registry = PluginRegistry::with_plugins([descriptor("t.one", &[]).with_tags(["OSS"])]).unwrap();
        assert_eq!(ids(&registry.search("oss")), ["t.one"]);
        assert_eq!(ids(&registry.search("Oss")), ["t.one"]);
    }

    #[test]
    fn len_and_is_empty() {
        let mut registry = PluginRegistry::new();
        assert!(registry.is_empty());
        registry.register(descriptor("l.test", &[])).unwrap();
        assert!(!registry.is_empty());
        assert_eq!(registry.len(), 1);
    }
}
