// SPDX-FileCopyrightText: 2026 Rivet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Severity gate over vulnerability findings.
//!
//! The gate fails the build with `RivetError::VulnerabilityThreshold` when
//! any finding scores at or above the configured CVSS threshold. Findings
//! below the threshold are reported but do not fail.

use rivet_core::RivetError;
use tracing::{info, warn};

use crate::finding::Finding;

/// Default failure threshold, matching CVSS "critical".
pub const DEFAULT_FAIL_ON_CVSS: f32 = 9.0;

/// Summary of a passing evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditOutcome {
    pub total: usize,
    /// Highest score seen, 0.0 when there are no findings.
    pub highest: f32,
}

/// Compares findings against a CVSS failure threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AuditGate {
    threshold: f32,
}

impl Default for AuditGate {
    fn default() -> Self {
        Self::new(DEFAULT_FAIL_ON_CVSS)
    }
}

impl AuditGate {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Findings at or above the threshold, highest score first.
    pub fn failing<'a>(&self, findings: &'a [Finding]) -> Vec<&'a Finding> {
        let mut failing: Vec<&Finding> = findings.iter().filter(|f| f.cvss >= self.threshold).collect();
        failing.sort_by(|a, b| b.cvss.total_cmp(&a.cvss).then_with(|| a.id.cmp(&b.id)));
        failing
    }

    /// Pass when every finding scores below the threshold.
    pub fn evaluate(&self, findings: &[Finding]) -> Result<AuditOutcome, RivetError> {
        let highest = findings.iter().map(|f| f.cvss).fold(0.0_f32, f32::max);
        let failing = self.failing(findings);

        if !failing.is_empty() {
            for finding in &failing {
                warn!(
                    id = %finding.id,
                    coordinate = %finding.coordinate,
                    cvss = finding.cvss,
                    "vulnerability at or above threshold"
                );
            }
            return Err(RivetError::VulnerabilityThreshold {
                count: failing.len(),
                threshold: self.threshold,
                highest,
            });
        }

        info!(total = findings.len(), highest, threshold = self.threshold, "audit passed");
        Ok(AuditOutcome {
            total: findings.len(),
            highest,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(id: &str, cvss: f32) -> Finding {
        Finding {
            id: id.to_string(),
            coordinate: "org.yaml:snakeyaml:1.33".parse().unwrap(),
            cvss,
            description: String::new(),
        }
    }

    #[test]
    fn no_findings_pass() {
        let outcome = AuditGate::default().evaluate(&[]).unwrap();
        assert_eq!(outcome, AuditOutcome { total: 0, highest: 0.0 });
    }

    #[test]
    fn below_threshold_passes() {
        let findings = [finding("CVE-1", 8.9), finding("CVE-2", 4.0)];
        let outcome = AuditGate::default().evaluate(&findings).unwrap();
        assert_eq!(outcome.total, 2);
        assert_eq!(outcome.highest, 8.9);
    }

    #[test]
    fn threshold_is_inclusive() {
        let findings = [finding("CVE-1", 9.0), finding("CVE-2", 9.8), finding("CVE-3", 2.0)];
        match AuditGate::default().evaluate(&findings) {
            Err(RivetError::VulnerabilityThreshold { count, threshold, highest }) => {
                assert_eq!(count, 2);
                assert_eq!(threshold, 9.0);
                assert_eq!(highest, 9.8);
            }
            other => panic!("expected threshold failure, got {other:?}"),
        }
    }

    #[test]
    fn failing_sorted_by_score() {
        let findings = [finding("CVE-1", 7.5), finding("CVE-2", 9.1), finding("CVE-3", 7.5)];
        let ids: Vec<&str> = AuditGate::new(7.0).failing(&findings).iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, ["CVE-2", "CVE-1", "CVE-3"]);
    }

    #[test]
    fn zero_threshold_fails_on_any_finding() {
        assert!(AuditGate::new(0.0).evaluate(&[finding("CVE-1", 0.0)]).is_err());
    }
}
