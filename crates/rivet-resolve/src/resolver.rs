// SPDX-FileCopyrightText: 2026 Rivet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dependency resolution: override rules, dynamic version selection, and
//! minimum-version constraints.
//!
//! [`resolve`] is the rule evaluator on its own. [`Resolver`] wraps it with
//! the rest of the pipeline:
//!
//! 1. override rules, in declaration order (exclude short-circuits, the last
//!    matching pin/substitute wins)
//! 2. dynamic spec selection against the [`VersionCatalog`], if one is set
//! 3. minimum-version constraints
//!
//! Results can be cached for the lifetime of the resolver only.

use std::cmp::Ordering;
use std::time::Duration;

use rivet_core::{compare_versions, Coordinate, RivetError, VersionSpec};
use tracing::{debug, info};

use crate::available::VersionCatalog;
use crate::cache::ResolutionCache;
use crate::rule::{OverrideRule, VersionConstraint};

/// Apply override rules to one requested coordinate.
///
/// Rules are matched against the requested coordinate, never against the
/// output of an earlier substitute. Any matching exclude yields
/// `DependencyExcluded`. Otherwise the last matching pin or substitute decides
/// the result; with no match the request passes through unchanged.
pub fn resolve(requested: &Coordinate, rules: &[OverrideRule]) -> Result<Coordinate, RivetError> {
    let mut winner: Option<&OverrideRule> = None;

    for rule in rules.iter().filter(|r| r.selector().matches(requested)) {
        if let OverrideRule::Exclude { because, .. } = rule {
            debug!(
                dependency = %requested,
                because = because.as_deref().unwrap_or("-"),
                "excluded by rule"
            );
            return Err(RivetError::DependencyExcluded {
                group: requested.group.clone(),
                artifact: requested.artifact.clone(),
            });
        }
        winner = Some(rule);
    }

    let resolved = match winner {
        Some(OverrideRule::Pin { version, .. }) => {
            requested.with_version(VersionSpec::Exact(version.clone()))
        }
        Some(OverrideRule::Substitute { replacement, .. }) => replacement.clone(),
        Some(OverrideRule::Exclude { .. }) | None => requested.clone(),
    };

    if let Some(rule) = winner {
        debug!(
            dependency = %requested,
            resolved = %resolved,
            rule = %rule.kind(),
            because = rule.because().unwrap_or("-"),
            "override applied"
        );
    }
    Ok(resolved)
}

/// Outcome of resolving a batch of requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// `(requested, resolved)` pairs in request order.
    pub resolved: Vec<(Coordinate, Coordinate)>,
    /// Requests removed by exclude rules.
    pub excluded: Vec<Coordinate>,
}

/// Full resolution pipeline for one build invocation.
#[derive(Debug)]
pub struct Resolver {
    rules: Vec<OverrideRule>,
    constraints: Vec<VersionConstraint>,
    catalog: Option<VersionCatalog>,
    cache: ResolutionCache,
}

impl Resolver {
    /// A resolver with the given rules, no constraints, no catalog and caching off.
    pub fn new(rules: Vec<OverrideRule>) -> Self {
        Self {
            rules,
            constraints: Vec::new(),
            catalog: None,
            cache: ResolutionCache::disabled(),
        }
    }

    pub fn with_constraints(mut self, constraints: Vec<VersionConstraint>) -> Self {
        self.constraints = constraints;
        self
    }

    pub fn with_catalog(mut self, catalog: VersionCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Cache resolved values for `duration`. Zero means always re-resolve.
    pub fn with_cache_duration(mut self, duration: Duration) -> Self {
        self.cache = ResolutionCache::new(duration);
        self
    }

    pub fn rules(&self) -> &[OverrideRule] {
        &self.rules
    }

    /// Resolve one request through rules, catalog selection and constraints.
    pub fn resolve(&mut self, requested: &Coordinate) -> Result<Coordinate, RivetError> {
        if let Some(hit) = self.cache.get(requested) {
            debug!(dependency = %requested, resolved = %hit, "resolution cache hit");
            return Ok(hit.clone());
        }

        let ruled = resolve(requested, &self.rules)?;
        let selected = self.select_version(ruled)?;
        let resolved = self.apply_constraints(selected);

        self.cache.insert(requested.clone(), resolved.clone());
        Ok(resolved)
    }

    /// Resolve every request. Excluded requests are collected; any other
    /// failure aborts the whole batch.
    pub fn resolve_all(&mut self, requests: &[Coordinate]) -> Result<Resolution, RivetError> {
        let mut resolution = Resolution::default();
        for requested in requests {
            match self.resolve(requested) {
                Ok(resolved) => resolution.resolved.push((requested.clone(), resolved)),
                Err(RivetError::DependencyExcluded { .. }) => {
                    resolution.excluded.push(requested.clone())
                }
                Err(e) => return Err(e),
            }
        }
        info!(
            resolved = resolution.resolved.len(),
            excluded = resolution.excluded.len(),
            "dependencies resolved"
        );
        Ok(resolution)
    }

    fn select_version(&self, coordinate: Coordinate) -> Result<Coordinate, RivetError> {
        let Some(catalog) = &self.catalog else {
            return Ok(coordinate);
        };
        if !coordinate.version.is_dynamic() {
            return Ok(coordinate);
        }

        let available = catalog.versions(&coordinate.key());
        match coordinate.version.select(available) {
            Some(version) => {
                debug!(dependency = %coordinate, selected = version, "dynamic version selected");
                Ok(coordinate.with_version(VersionSpec::Exact(version.to_string())))
            }
            None => Err(RivetError::UnresolvableVersionRange {
                group: coordinate.group.clone(),
                artifact: coordinate.artifact.clone(),
                spec: coordinate.version.to_string(),
                reason: if available.is_empty() {
                    "no versions are available".to_string()
                } else {
                    format!("none of {} available version(s) match", available.len())
                },
            }),
        }
    }

    fn apply_constraints(&self, coordinate: Coordinate) -> Coordinate {
        let key = coordinate.key();
        let mut current = coordinate;

        for constraint in self.constraints.iter().filter(|c| c.module == key) {
            let VersionSpec::Exact(version) = &current.version else {
                debug!(
                    dependency = %current,
                    minimum = %constraint.minimum,
                    "constraint skipped for unresolved dynamic version"
                );
                continue;
            };
            if compare_versions(version, &constraint.minimum) == Ordering::Less {
                info!(
                    dependency = %current,
                    minimum = %constraint.minimum,
                    because = constraint.because.as_deref().unwrap_or("-"),
                    "raised to constraint minimum"
                );
                current = current.with_version(VersionSpec::Exact(constraint.minimum.clone()));
            }
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::ModuleSelector;
    use rivet_core::ModuleKey;

    fn coord(s: &str) -> Coordinate {
        s.parse().unwrap()
    }

    #[test]
    fn no_matching_rule_passes_through() {
        let rules = vec![OverrideRule::pin("other", "lib", "9.9")];
        let requested = coord("g:a:1.0");
        assert_eq!(resolve(&requested, &rules).unwrap(), requested);
    }

    #[test]
    fn last_pin_wins() {
        let rules = vec![OverrideRule::pin("g", "a", "1.0"), OverrideRule::pin("g", "a", "2.0")];
        assert_eq!(resolve(&coord("g:a:0.5"), &rules).unwrap(), coord("g:a:2.0"));
    }

    #[test]
    fn substitute_then_pin_uses_pin() {
        let rules = vec![
            OverrideRule::substitute("g", "a", coord("h:b:3.0")),
            OverrideRule::pin("g", "a", "2.0"),
        ];
        assert_eq!(resolve(&coord("g:a:1.0"), &rules).unwrap(), coord("g:a:2.0"));
    }

    #[test]
    fn pin_then_substitute_uses_substitute() {
        let rules = vec![
            OverrideRule::pin("g", "a", "2.0"),
            OverrideRule::substitute("g", "a", coord("h:b:3.0")),
        ];
        assert_eq!(resolve(&coord("g:a:1.0"), &rules).unwrap(), coord("h:b:3.0"));
    }

    #[test]
    fn exclude_wins_regardless_of_position() {
        let rules = vec![
            OverrideRule::pin("g", "a", "2.0"),
            OverrideRule::exclude("g", "a"),
            OverrideRule::pin("g", "a", "3.0"),
        ];
        assert!(matches!(
            resolve(&coord("g:a:1.0"), &rules),
            Err(RivetError::DependencyExcluded { .. })
        ));
    }

    #[test]
    fn version_prefix_condition_limits_pin() {
        let rules = vec![OverrideRule::Pin {
            selector: ModuleSelector::new("org.apache.commons", "commons-compress")
                .when_version_starts_with("1.25"),
            version: "1.26.0".to_string(),
            because: None,
        }];
        assert_eq!(
            resolve(&coord("org.apache.commons:commons-compress:1.25.0"), &rules).unwrap(),
            coord("org.apache.commons:commons-compress:1.26.0")
        );
        assert_eq!(
            resolve(&coord("org.apache.commons:commons-compress:1.24.0"), &rules).unwrap(),
            coord("org.apache.commons:commons-compress:1.24.0")
        );
    }

    #[test]
    fn catalog_selects_newest_match() {
        let mut catalog = VersionCatalog::new();
        catalog.add(ModuleKey::new("g", "a"), ["10.0.1", "10.2.0", "11.0.0"]);
        let mut resolver = Resolver::new(vec![]).with_catalog(catalog);
        assert_eq!(resolver.resolve(&coord("g:a:10.+")).unwrap(), coord("g:a:10.2.0"));
    }

    #[test]
    fn unmatched_range_is_unresolvable() {
        let mut catalog = VersionCatalog::new();
        catalog.add(ModuleKey::new("g", "a"), ["1.0"]);
        let mut resolver = Resolver::new(vec![]).with_catalog(catalog);
        let err = resolver.resolve(&coord("g:a:[2.0,3.0)")).unwrap_err();
        assert!(matches!(err, RivetError::UnresolvableVersionRange { ref spec, .. } if spec == "[2.0,3.0)"));
    }

    #[test]
    fn dynamic_specs_pass_through_without_catalog() {
        let mut resolver = Resolver::new(vec![]);
        assert_eq!(
            resolver.resolve(&coord("g:a:latest.release")).unwrap(),
            coord("g:a:latest.release")
        );
    }

    #[test]
    fn constraint_raises_low_versions_only() {
        let constraint = VersionConstraint {
            module: ModuleKey::new("com.h2database", "h2"),
            minimum: "2.2.224".to_string(),
            because: Some("CVE-2022-45868".to_string()),
        };
        let mut resolver = Resolver::new(vec![]).with_constraints(vec![constraint]);
        assert_eq!(
            resolver.resolve(&coord("com.h2database:h2:1.4.200")).unwrap(),
            coord("com.h2database:h2:2.2.224")
        );
        assert_eq!(
            resolver.resolve(&coord("com.h2database:h2:2.3.232")).unwrap(),
            coord("com.h2database:h2:2.3.232")
        );
    }

    #[test]
    fn resolve_all_collects_exclusions() {
        let mut resolver = Resolver::new(vec![OverrideRule::exclude("com.google.errorprone", "*")]);
        let resolution = resolver
            .resolve_all(&[
                coord("com.google.errorprone:error_prone_annotations:2.26.1"),
                coord("org.jetbrains:annotations:24.1.0"),
            ])
            .unwrap();
        assert_eq!(resolution.excluded, [coord("com.google.errorprone:error_prone_annotations:2.26.1")]);
        assert_eq!(resolution.resolved.len(), 1);
    }

    #[test]
    fn resolve_all_aborts_on_failure() {
        let mut resolver = Resolver::new(vec![]).with_catalog(VersionCatalog::new());
        let err = resolver
            .resolve_all(&[coord("g:a:1.0"), coord("g:b:2.+")])
            .unwrap_err();
        assert!(matches!(err, RivetError::UnresolvableVersionRange { .. }));
    }

    #[test]
    fn cache_is_used_only_when_enabled() {
        let mut catalog = VersionCatalog::new();
        catalog.add(ModuleKey::new("g", "a"), ["1.0"]);

        let mut cached = Resolver::new(vec![])
            .with_catalog(catalog.clone())
            .with_cache_duration(Duration::from_secs(300));
        cached.resolve(&coord("g:a:1.+")).unwrap();
        assert_eq!(cached.cache.len(), 1);

        let mut uncached = Resolver::new(vec![]).with_catalog(catalog);
        uncached.resolve(&coord("g:a:1.+")).unwrap();
        assert!(uncached.cache.is_empty());
    }
}
