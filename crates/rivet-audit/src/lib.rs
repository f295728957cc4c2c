// SPDX-FileCopyrightText: 2026 Rivet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dependency audit gate for Rivet.
//!
//! Evaluates caller-supplied vulnerability findings against a CVSS
//! threshold and renders reports. Nothing here performs network lookups.

pub mod credential;
pub mod finding;
pub mod gate;
pub mod report;

pub use credential::NvdCredential;
pub use finding::{Finding, Severity, load_findings, parse_findings};
pub use gate::{AuditGate, AuditOutcome, DEFAULT_FAIL_ON_CVSS};
pub use report::{ReportFormat, render_report};
