// SPDX-FileCopyrightText: 2026 Rivet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Rivet build toolkit.
//!
//! Provides the error type, plugin identifiers, dependency coordinates and
//! version specs shared by the registry, resolver, annotator and CLI crates.

pub mod coordinate;
pub mod error;
pub mod types;
pub mod version;

// Re-export key items at crate root for ergonomic imports.
pub use coordinate::{Coordinate, ModuleKey};
pub use error::RivetError;
pub use types::{ImplementationBinding, PluginId};
pub use version::{compare_versions, VersionSpec};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct_per_kind() {
        let errors = [
            RivetError::Config("x".into()),
            RivetError::io("x", std::io::Error::other("x")),
            RivetError::Manifest("x".into()),
            RivetError::InvalidIdentifier { id: "x".into(), reason: "x".into() },
            RivetError::InvalidCoordinate { input: "x".into(), reason: "x".into() },
            RivetError::UnknownPlugin { id: "x".into() },
            RivetError::DuplicateIdentifier { id: "x".into() },
            RivetError::PluginCycle { chain: vec![] },
            RivetError::DependencyExcluded { group: "g".into(), artifact: "a".into() },
            RivetError::UnresolvableVersionRange {
                group: "g".into(),
                artifact: "a".into(),
                spec: "1.+".into(),
                reason: "x".into(),
            },
            RivetError::MissingHeaderTemplate { path: None },
            RivetError::MissingLicenseHeaders { count: 2 },
            RivetError::VulnerabilityThreshold { count: 1, threshold: 9.0, highest: 9.8 },
        ];

        let mut codes: Vec<i32> = errors.iter().map(RivetError::exit_code).collect();
        assert!(codes.iter().all(|&c| c != 0));
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn error_messages_name_the_subject() {
        let err = RivetError::PluginCycle {
            chain: vec!["a.b".into(), "a.c".into(), "a.b".into()],
        };
        assert_eq!(err.to_string(), "plugin application cycle: a.b -> a.c -> a.b");

        let err = RivetError::MissingHeaderTemplate {
            path: Some("gradle/licenseHeader.txt".into()),
        };
        assert!(err.to_string().ends_with("at gradle/licenseHeader.txt"));
    }
}
