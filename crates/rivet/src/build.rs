// SPDX-FileCopyrightText: 2026 Rivet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One build step: plugins, then dependencies, then license headers, then
//! the optional audit gate.
//!
//! Any failure aborts the step; nothing after the failing stage runs.

use std::path::{Path, PathBuf};
use std::time::Duration;

use rivet_audit::{AuditGate, AuditOutcome, Finding};
use rivet_config::RivetConfig;
use rivet_core::{PluginId, RivetError};
use rivet_license::{ExclusionSet, LicenseAnnotator, collect_files, current_year};
use rivet_plugin::PluginRegistry;
use rivet_resolve::{Resolution, Resolver};
use tracing::info;

use crate::manifest::BuildManifest;

/// What a build step produced.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Plugin ids in application order.
    pub applied: Vec<PluginId>,
    pub resolution: Resolution,
    /// Files that received a header; zero when no source tree was given.
    pub annotated: usize,
    pub audit: Option<AuditOutcome>,
}

/// Expand `ids` into the full application order.
pub fn apply_plugins(registry: &PluginRegistry, ids: &[String]) -> Result<Vec<PluginId>, RivetError> {
    let order = registry.application_order_all(ids.iter().map(String::as_str))?;
    Ok(order.into_iter().map(|d| d.id.clone()).collect())
}

/// Resolve the manifest's dependency requests.
pub fn resolve_dependencies(manifest: &BuildManifest, config: &RivetConfig) -> Result<Resolution, RivetError> {
    let mut resolver = Resolver::new(manifest.override_rules()?)
        .with_constraints(manifest.version_constraints()?)
        .with_cache_duration(Duration::from_secs(config.resolution.cache_duration_secs));
    if let Some(catalog) = manifest.catalog()? {
        resolver = resolver.with_catalog(catalog);
    }
    resolver.resolve_all(&manifest.requests()?)
}

/// An annotator configured from the `[license]` section.
pub fn license_annotator(config: &RivetConfig) -> Result<LicenseAnnotator, RivetError> {
    let license = &config.license;
    let exclusions = ExclusionSet::new(&license.exclude)?;
    Ok(LicenseAnnotator::new(license.template()?, exclusions)
        .with_styles(license.style_mapping())
        .with_year(license.year.unwrap_or_else(current_year))
        .skip_existing_headers(license.skip_existing_headers)
        .strict_check(license.strict_check))
}

/// Pair each path with the annotator that handles it.
///
/// Directories are walked and match exclusions relative to themselves. Plain
/// files are taken as given and match exclusions against the path as typed.
pub fn license_targets(
    annotator: &LicenseAnnotator,
    paths: &[PathBuf],
) -> Result<Vec<(LicenseAnnotator, Vec<PathBuf>)>, RivetError> {
    let mut targets = Vec::new();
    let mut loose = Vec::new();
    for path in paths {
        if path.is_dir() {
            targets.push((annotator.clone().with_root(path), collect_files(path)?));
        } else {
            loose.push(path.clone());
        }
    }
    if !loose.is_empty() {
        targets.push((annotator.clone(), loose));
    }
    Ok(targets)
}

/// Run the whole step.
pub fn run_build(
    manifest: &BuildManifest,
    config: &RivetConfig,
    source: Option<&Path>,
    findings: Option<&[Finding]>,
) -> Result<BuildReport, RivetError> {
    let registry = manifest.registry()?;
    let applied = apply_plugins(&registry, &manifest.plugins)?;
    info!(plugins = applied.len(), "plugins applied");

    let resolution = resolve_dependencies(manifest, config)?;

    let annotated = match source {
        Some(root) => license_annotator(config)?
            .with_root(root)
            .annotate(&collect_files(root)?)?,
        None => 0,
    };

    let audit = findings
        .map(|findings| AuditGate::new(config.audit.fail_on_cvss).evaluate(findings))
        .transpose()?;

    Ok(BuildReport {
        applied,
        resolution,
        annotated,
        audit,
    })
}
