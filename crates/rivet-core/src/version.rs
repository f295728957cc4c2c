// SPDX-FileCopyrightText: 2026 Rivet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Version specs (`1.2.3`, `1.+`, `[1.0,2.0)`, `latest.release`) and version ordering.
//!
//! Ordering follows the conventions of JVM build tools rather than semver:
//! versions split into numeric and textual parts, numeric parts compare
//! numerically, a number outranks text, and a release outranks its own
//! qualified pre-releases (`9.0.0-beta7 < 9.0.0`).

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Sentinel spec meaning "newest release available at build time".
pub const LATEST_RELEASE: &str = "latest.release";

/// A requested version: exact, dynamic, or the `latest.release` sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum VersionSpec {
    /// A single concrete version.
    Exact(String),
    /// Any version whose text starts with the prefix (written `1.+` or `12.1+`).
    Prefix(String),
    /// A maven-style interval such as `[1.0,2.0)`. Either bound may be absent.
    Range {
        lower: Option<Bound>,
        upper: Option<Bound>,
    },
    /// Newest available release. Not reproducible across invocations.
    LatestRelease,
}

/// One end of a version range.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bound {
    pub version: String,
    pub inclusive: bool,
}

impl VersionSpec {
    /// Parse a version spec, returning a human-readable reason on failure.
    pub fn parse(input: &str) -> Result<Self, String> {
        let s = input.trim();
        if s.is_empty() {
            return Err("version must not be empty".to_string());
        }
        if s == LATEST_RELEASE {
            return Ok(VersionSpec::LatestRelease);
        }
        if s.starts_with('[') || s.starts_with('(') {
            return parse_range(s);
        }
        if let Some(prefix) = s.strip_suffix('+') {
            if prefix.contains('+') {
                return Err(format!("`{s}` has more than one `+`"));
            }
            return Ok(VersionSpec::Prefix(prefix.to_string()));
        }
        if s.contains('+') {
            return Err(format!("`+` must end a prefix version, got `{s}`"));
        }
        if s.contains([',', '[', ']', '(', ')', ' ']) {
            return Err(format!("`{s}` is neither a version nor a range"));
        }
        Ok(VersionSpec::Exact(s.to_string()))
    }

    /// True for specs whose outcome depends on which versions are available.
    pub fn is_dynamic(&self) -> bool {
        !matches!(self, VersionSpec::Exact(_))
    }

    /// Whether a concrete candidate version satisfies this spec.
    pub fn matches(&self, candidate: &str) -> bool {
        match self {
            VersionSpec::Exact(v) => compare_versions(v, candidate) == Ordering::Equal,
            VersionSpec::Prefix(p) => candidate.starts_with(p.as_str()),
            VersionSpec::Range { lower, upper } => {
                let above = lower.as_ref().is_none_or(|b| {
                    let ord = compare_versions(candidate, &b.version);
                    ord == Ordering::Greater || (b.inclusive && ord == Ordering::Equal)
                });
                let below = upper.as_ref().is_none_or(|b| {
                    let ord = compare_versions(candidate, &b.version);
                    ord == Ordering::Less || (b.inclusive && ord == Ordering::Equal)
                });
                above && below
            }
            VersionSpec::LatestRelease => !is_snapshot(candidate),
        }
    }

    /// Pick the newest version from `available` that satisfies this spec.
    pub fn select<'a>(&self, available: &'a [String]) -> Option<&'a str> {
        available
            .iter()
            .filter(|v| self.matches(v))
            .max_by(|a, b| compare_versions(a, b))
            .map(String::as_str)
    }
}

impl fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionSpec::Exact(v) => f.write_str(v),
            VersionSpec::Prefix(p) => write!(f, "{p}+"),
            VersionSpec::Range { lower, upper } => {
                match lower {
                    Some(b) => write!(f, "{}{}", if b.inclusive { '[' } else { '(' }, b.version)?,
                    None => f.write_str("(")?,
                }
                f.write_str(",")?;
                match upper {
                    Some(b) => write!(f, "{}{}", b.version, if b.inclusive { ']' } else { ')' }),
                    None => f.write_str(")"),
                }
            }
            VersionSpec::LatestRelease => f.write_str(LATEST_RELEASE),
        }
    }
}

impl TryFrom<String> for VersionSpec {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<VersionSpec> for String {
    fn from(spec: VersionSpec) -> Self {
        spec.to_string()
    }
}

fn parse_range(s: &str) -> Result<VersionSpec, String> {
    let lower_inclusive = s.starts_with('[');
    let upper_inclusive = match s.chars().last() {
        Some(']') => true,
        Some(')') => false,
        _ => return Err(format!("range `{s}` must end with `]` or `)`")),
    };
    let inner = &s[1..s.len() - 1];
    let Some((lo, hi)) = inner.split_once(',') else {
        return Err(format!("range `{s}` must contain a `,`"));
    };
    if hi.contains(',') {
        return Err(format!("range `{s}` has more than two bounds"));
    }
    let (lo, hi) = (lo.trim(), hi.trim());
    if lo.is_empty() && hi.is_empty() {
        return Err(format!("range `{s}` has no bounds"));
    }

    let lower = (!lo.is_empty()).then(|| Bound {
        version: lo.to_string(),
        inclusive: lower_inclusive,
    });
    let upper = (!hi.is_empty()).then(|| Bound {
        version: hi.to_string(),
        inclusive: upper_inclusive,
    });

    if let (Some(l), Some(u)) = (&lower, &upper)
        && compare_versions(&l.version, &u.version) == Ordering::Greater
    {
        return Err(format!("range `{s}` has its lower bound above its upper bound"));
    }

    Ok(VersionSpec::Range { lower, upper })
}

fn is_snapshot(version: &str) -> bool {
    version.to_ascii_lowercase().contains("snapshot")
}

#[derive(Debug, PartialEq, Eq)]
enum Part<'a> {
    /// Digits with leading zeros stripped, so any length compares numerically.
    Num(&'a str),
    Text(&'a str),
}

fn compare_digits(x: &str, y: &str) -> Ordering {
    x.len().cmp(&y.len()).then_with(|| x.cmp(y))
}

fn parts(version: &str) -> Vec<Part<'_>> {
    let mut out = Vec::new();
    for token in version.split(['.', '-', '_', '+']).filter(|t| !t.is_empty()) {
        // Split `beta7` into `beta` and `7`.
        let mut start = 0;
        let bytes = token.as_bytes();
        for i in 1..=bytes.len() {
            let boundary = i == bytes.len() || bytes[i].is_ascii_digit() != bytes[i - 1].is_ascii_digit();
            if boundary {
                let piece = &token[start..i];
                out.push(if bytes[start].is_ascii_digit() {
                    Part::Num(piece.trim_start_matches('0'))
                } else {
                    Part::Text(piece)
                });
                start = i;
            }
        }
    }
    out
}

fn qualifier_rank(text: &str) -> u8 {
    match text.to_ascii_lowercase().as_str() {
        "dev" => 0,
        "rc" | "cr" => 2,
        "snapshot" => 3,
        "final" => 4,
        "ga" => 5,
        "release" => 6,
        "sp" => 7,
        _ => 1,
    }
}

/// Compare two concrete versions.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let (pa, pb) = (parts(a), parts(b));
    for i in 0..pa.len().max(pb.len()) {
        let ord = match (pa.get(i), pb.get(i)) {
            (Some(Part::Num(x)), Some(Part::Num(y))) => compare_digits(x, y),
            (Some(Part::Num(_)), Some(Part::Text(_))) => Ordering::Greater,
            (Some(Part::Text(_)), Some(Part::Num(_))) => Ordering::Less,
            (Some(Part::Text(x)), Some(Part::Text(y))) => qualifier_rank(x)
                .cmp(&qualifier_rank(y))
                .then_with(|| x.cmp(y)),
            // A trailing number makes a version newer, a trailing qualifier older.
            (Some(Part::Num(_)), None) => Ordering::Greater,
            (Some(Part::Text(_)), None) => Ordering::Less,
            (None, Some(Part::Num(_))) => Ordering::Less,
            (None, Some(Part::Text(_))) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

#[cfg(test)]
mod tests {
    use super::*;

    fn versions(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_each_form() {
        assert_eq!(VersionSpec::parse("1.26.0").unwrap(), VersionSpec::Exact("1.26.0".into()));
        assert_eq!(VersionSpec::parse("1.+").unwrap(), VersionSpec::Prefix("1.".into()));
        assert_eq!(VersionSpec::parse("12.1+").unwrap(), VersionSpec::Prefix("12.1".into()));
        assert_eq!(VersionSpec::parse("latest.release").unwrap(), VersionSpec::LatestRelease);
        assert!(matches!(
            VersionSpec::parse("[1.0,2.0)").unwrap(),
            VersionSpec::Range { lower: Some(_), upper: Some(_) }
        ));
    }

    #[test]
    fn rejects_malformed_specs() {
        assert!(VersionSpec::parse("").is_err());
        assert!(VersionSpec::parse("1.+.2").is_err());
        assert!(VersionSpec::parse("[1.0,2.0").is_err());
        assert!(VersionSpec::parse("[2.0,1.0]").is_err());
        assert!(VersionSpec::parse("[,]").is_err());
    }

    #[test]
    fn display_round_trips_source_text() {
        for s in ["1.26.0", "1.+", "12.1+", "latest.release", "[1.0,2.0)", "(,3.0]"] {
            assert_eq!(VersionSpec::parse(s).unwrap().to_string(), s);
        }
    }

    #[test]
    fn numeric_parts_compare_numerically() {
        assert_eq!(compare_versions("1.10.0", "1.9.0"), Ordering::Greater);
        assert_eq!(compare_versions("2.0.6.1", "2.0.6"), Ordering::Greater);
        assert_eq!(compare_versions("1.0", "1.0.0"), Ordering::Less);
    }

    #[test]
    fn numbers_beyond_u64_stay_numeric() {
        assert_eq!(
            compare_versions("1.99999999999999999999", "1.100000000000000000000"),
            Ordering::Less
        );
        assert_eq!(compare_versions("1.20260101120000000000", "1.9"), Ordering::Greater);
        assert_eq!(compare_versions("1.99999999999999999999", "1.beta"), Ordering::Greater);
        assert_eq!(compare_versions("1.007", "1.7"), Ordering::Equal);
    }

    #[test]
    fn prereleases_sort_below_release() {
        assert_eq!(compare_versions("9.0.0-beta7", "9.0.0"), Ordering::Less);
        assert_eq!(compare_versions("9.0.0-beta7", "9.0.0-beta10"), Ordering::Less);
        assert_eq!(compare_versions("1.0-rc1", "1.0-alpha"), Ordering::Greater);
    }

    #[test]
    fn prefix_selects_newest_match() {
        let available = versions(&["1.25.0", "1.26.0", "1.9.1", "2.0.0"]);
        let spec = VersionSpec::parse("1.+").unwrap();
        assert_eq!(spec.select(&available), Some("1.26.0"));
    }

    #[test]
    fn range_respects_bound_inclusivity() {
        let spec = VersionSpec::parse("[1.0,2.0)").unwrap();
        assert!(spec.matches("1.0"));
        assert!(spec.matches("1.9.9"));
        assert!(!spec.matches("2.0"));
        let open = VersionSpec::parse("(1.0,]").unwrap();
        assert!(!open.matches("1.0"));
        assert!(open.matches("7.3"));
    }

    #[test]
    fn latest_release_skips_snapshots() {
        let available = versions(&["8.45.5", "8.46.0-SNAPSHOT", "8.44.0"]);
        assert_eq!(VersionSpec::LatestRelease.select(&available), Some("8.45.5"));
    }

    #[test]
    fn select_returns_none_without_match() {
        let spec = VersionSpec::parse("3.+").unwrap();
        assert_eq!(spec.select(&versions(&["1.0", "2.0"])), None);
    }
}
