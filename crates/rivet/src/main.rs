// SPDX-FileCopyrightText: 2026 Rivet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rivet: plugin resolution, dependency overrides and license headers for
//! recipe-library builds.
//!
//! Exit status is 0 on success, 2 for configuration errors, and the
//! per-kind code of `RivetError` for everything else.

mod build;
mod manifest;
mod output;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use rivet_audit::{AuditGate, Finding, NvdCredential, ReportFormat, load_findings, render_report};
use rivet_config::RivetConfig;
use rivet_core::RivetError;
use rivet_plugin::builtin_registry;
use tracing::{debug, info};

use crate::build::{apply_plugins, license_annotator, license_targets, resolve_dependencies, run_build};
use crate::manifest::BuildManifest;
use crate::output::Output;

/// Exit status for configuration errors rendered as diagnostics.
const CONFIG_EXIT_CODE: i32 = 2;

/// Rivet: plugin resolution, dependency overrides and license headers.
#[derive(Parser, Debug)]
#[command(name = "rivet", version, about, long_about = None)]
struct Cli {
    /// Config file used in place of ./rivet.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Disable colored output.
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List known plugins.
    Plugins {
        /// Only show plugins matching this text.
        #[arg(long)]
        search: Option<String>,
        /// Also list the plugins declared in this build manifest.
        #[arg(long)]
        manifest: Option<PathBuf>,
    },
    /// Print the order in which plugins are applied.
    Apply {
        #[arg(required = true)]
        ids: Vec<String>,
        #[arg(long)]
        manifest: Option<PathBuf>,
    },
    /// Resolve the dependencies declared in a build manifest.
    Resolve {
        #[arg(long, default_value = "build.toml")]
        manifest: PathBuf,
    },
    /// Add license headers, or list files missing one with --check.
    License {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        #[arg(long)]
        check: bool,
    },
    /// Gate vulnerability findings and write reports.
    Audit {
        /// JSON findings file.
        #[arg(long)]
        findings: PathBuf,
        /// Overrides audit.format.
        #[arg(long)]
        format: Option<ReportFormat>,
        /// Directory reports are written to.
        #[arg(long, default_value = ".")]
        output: PathBuf,
    },
    /// Run one build step: plugins, dependencies, license headers, audit.
    Build {
        #[arg(long, default_value = "build.toml")]
        manifest: PathBuf,
        /// Source tree to annotate.
        #[arg(long)]
        source: Option<PathBuf>,
        /// JSON findings file to gate on.
        #[arg(long)]
        findings: Option<PathBuf>,
        /// Directory audit reports are written to.
        #[arg(long, default_value = ".")]
        output: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => rivet_config::load_and_validate_path(path),
        None => rivet_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            rivet_config::render_errors(&errors);
            std::process::exit(CONFIG_EXIT_CODE);
        }
    };

    init_tracing(&config.log.level);
    if let Some(key) = config.audit.nvd_api_key.as_deref().and_then(NvdCredential::new) {
        debug!(nvd_api_key = %key, "NVD credential configured");
    }

    let out = Output::new(cli.plain);
    if let Err(err) = run(cli.command, &config, &out) {
        out.error(&err);
        std::process::exit(err.exit_code());
    }
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("rivet={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands, config: &RivetConfig, out: &Output) -> Result<(), RivetError> {
    match command {
        Commands::Plugins { search, manifest } => {
            let registry = match manifest {
                Some(path) => BuildManifest::load(&path)?.registry()?,
                None => builtin_registry()?,
            };
            let plugins = match &search {
                Some(query) => registry.search(query),
                None => registry.list_all(),
            };
            for plugin in plugins {
                out.plugin(plugin);
            }
        }
        Commands::Apply { ids, manifest } => {
            let registry = match manifest {
                Some(path) => BuildManifest::load(&path)?.registry()?,
                None => builtin_registry()?,
            };
            for id in apply_plugins(&registry, &ids)? {
                println!("{id}");
            }
        }
        Commands::Resolve { manifest } => {
            let manifest = BuildManifest::load(&manifest)?;
            let resolution = resolve_dependencies(&manifest, config)?;
            for (requested, resolved) in &resolution.resolved {
                out.resolved(requested, resolved);
            }
            for requested in &resolution.excluded {
                out.excluded(requested);
            }
        }
        Commands::License { paths, check } => {
            let targets = license_targets(&license_annotator(config)?, &paths)?;
            let total: usize = targets.iter().map(|(_, files)| files.len()).sum();
            if check {
                let mut missing = Vec::new();
                for (annotator, files) in &targets {
                    missing.extend(annotator.check(files)?);
                }
                for path in &missing {
                    out.missing_header(path);
                }
                if !missing.is_empty() {
                    return Err(RivetError::MissingLicenseHeaders { count: missing.len() });
                }
                out.success(&format!("{total} file(s) checked"));
            } else {
                let mut count = 0;
                for (annotator, files) in &targets {
                    count += annotator.annotate(files)?;
                }
                out.success(&format!("{count} file(s) annotated"));
            }
        }
        Commands::Audit {
            findings,
            format,
            output,
        } => {
            let findings = load_findings(&findings)?;
            let format = format.unwrap_or_else(|| config.audit.report_format());
            write_reports(&findings, format, &output)?;
            let outcome = AuditGate::new(config.audit.fail_on_cvss).evaluate(&findings)?;
            out.success(&format!(
                "{} finding(s), highest CVSS {:.1}",
                outcome.total, outcome.highest
            ));
        }
        Commands::Build {
            manifest,
            source,
            findings,
            output,
        } => {
            let manifest = BuildManifest::load(&manifest)?;
            let findings = findings.as_deref().map(load_findings).transpose()?;
            if let Some(findings) = &findings {
                write_reports(findings, config.audit.report_format(), &output)?;
            }
            let report = run_build(&manifest, config, source.as_deref(), findings.as_deref())?;
            for (requested, resolved) in &report.resolution.resolved {
                out.resolved(requested, resolved);
            }
            for requested in &report.resolution.excluded {
                out.excluded(requested);
            }
            out.success(&format!(
                "{} plugin(s) applied, {} dependencies resolved, {} file(s) annotated",
                report.applied.len(),
                report.resolution.resolved.len(),
                report.annotated
            ));
        }
    }
    Ok(())
}

/// Write one `dependency-check-report.<ext>` per rendered format.
fn write_reports(findings: &[Finding], format: ReportFormat, dir: &Path) -> Result<(), RivetError> {
    std::fs::create_dir_all(dir).map_err(|e| RivetError::io(dir, e))?;
    for (format, body) in render_report(findings, format) {
        let path = dir.join(format!("dependency-check-report.{}", format.extension()));
        std::fs::write(&path, body).map_err(|e| RivetError::io(&path, e))?;
        info!(path = %path.display(), "report written");
    }
    Ok(())
}
