// SPDX-FileCopyrightText: 2026 Rivet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prepends license headers to source files.
//!
//! Files matching an exclusion pattern, files with no mapped comment style,
//! and files that already carry a header are left untouched, so running the
//! annotator twice changes nothing the second time.

use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use rivet_core::RivetError;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::header::{current_year, header_state, HeaderState, HeaderTemplate};
use crate::style::{CommentStyle, StyleMapping};

/// Exclusions applied by default, matching file types that never carry headers.
pub const DEFAULT_EXCLUDES: &[&str] = &[
    "**/*.tokens",
    "**/*.config",
    "**/*.interp",
    "**/*.txt",
    "**/*.bat",
    "**/*.zip",
    "**/*.csv",
    "**/gradlew",
    "**/*.dontunpack",
    "**/*.css",
    "**/*.editorconfig",
    "**/*.md",
    "**/*.jar",
];

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Compiled glob exclusion patterns.
#[derive(Debug, Clone, Default)]
pub struct ExclusionSet {
    patterns: Vec<Pattern>,
    // File-name forms of `**/` patterns, matched against the last path component.
    name_patterns: Vec<Pattern>,
}

impl ExclusionSet {
    /// Compile patterns. An invalid glob fails with a `Config` error.
    pub fn new<I, S>(patterns: I) -> Result<Self, RivetError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| {
                Pattern::new(p.as_ref())
                    .map_err(|e| RivetError::Config(format!("invalid exclude pattern `{}`: {e}", p.as_ref())))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let name_patterns = patterns
            .iter()
            .filter_map(|p| p.as_str().strip_prefix("**/"))
            .filter(|tail| !tail.contains('/'))
            .filter_map(|tail| Pattern::new(tail).ok())
            .collect();
        Ok(Self {
            patterns,
            name_patterns,
        })
    }

    /// The default exclusion list.
    pub fn defaults() -> Self {
        // The built-in patterns are valid globs.
        Self::new(DEFAULT_EXCLUDES).unwrap_or_default()
    }

    /// Whether `path` matches any pattern.
    ///
    /// `**/`-prefixed patterns also match against the bare file name so they
    /// apply to absolute paths and paths outside a walk root.
    pub fn is_excluded(&self, path: &Path) -> bool {
        let normalized = path.to_string_lossy().replace('\\', "/");
        if self.patterns.iter().any(|p| p.matches_with(&normalized, MATCH_OPTIONS)) {
            return true;
        }
        let Some(name) = path.file_name().map(|n| n.to_string_lossy()) else {
            return false;
        };
        self.name_patterns.iter().any(|p| p.matches_with(&name, MATCH_OPTIONS))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// What happened to a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    Annotated,
    Replaced,
    AlreadyPresent,
    Excluded,
    Unmapped,
    Unreadable,
}

/// Applies a header template to files.
#[derive(Debug, Clone)]
pub struct LicenseAnnotator {
    template: HeaderTemplate,
    exclusions: ExclusionSet,
    styles: StyleMapping,
    year: i32,
    skip_existing_headers: bool,
    strict_check: bool,
    root: Option<PathBuf>,
}

impl LicenseAnnotator {
    /// An annotator for the current year with the default style mapping.
    pub fn new(template: HeaderTemplate, exclusions: ExclusionSet) -> Self {
        Self {
            template,
            exclusions,
            styles: StyleMapping::default(),
            year: current_year(),
            skip_existing_headers: true,
            strict_check: false,
            root: None,
        }
    }

    pub fn with_styles(mut self, styles: StyleMapping) -> Self {
        self.styles = styles;
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = year;
        self
    }

    pub fn skip_existing_headers(mut self, skip: bool) -> Self {
        self.skip_existing_headers = skip;
        self
    }

    pub fn strict_check(mut self, strict: bool) -> Self {
        self.strict_check = strict;
        self
    }

    /// Match exclusion patterns against paths relative to `root`.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Annotate every file that needs a header. Returns how many were written.
    pub fn annotate(&self, files: &[PathBuf]) -> Result<usize, RivetError> {
        let mut written = 0;
        for path in files {
            let outcome = self.annotate_file(path)?;
            debug!(path = %path.display(), ?outcome, "license header");
            if matches!(outcome, FileOutcome::Annotated | FileOutcome::Replaced) {
                written += 1;
            }
        }
        info!(files = files.len(), annotated = written, "license headers applied");
        Ok(written)
    }

    /// Annotate one file.
    pub fn annotate_file(&self, path: &Path) -> Result<FileOutcome, RivetError> {
        let Some((content, style)) = self.load(path)? else {
            return Ok(self.skip_reason(path));
        };
        let rendered = self.template.render(style, self.year);
        let prelude = style.prelude_len(&content);
        let (head, body) = content.split_at(prelude);
        let sep = if head.is_empty() || head.ends_with('\n') { "" } else { "\n" };

        let (updated, outcome) = match header_state(&content, style, &rendered) {
            HeaderState::Expected => return Ok(FileOutcome::AlreadyPresent),
            HeaderState::Other { .. } if self.skip_existing_headers => {
                return Ok(FileOutcome::AlreadyPresent);
            }
            HeaderState::Other { len } => {
                let rest = body[len..].trim_start_matches(['\n', '\r']);
                (format!("{head}{sep}{rendered}{rest}"), FileOutcome::Replaced)
            }
            HeaderState::Missing => {
                (format!("{head}{sep}{rendered}{body}"), FileOutcome::Annotated)
            }
        };

        std::fs::write(path, updated).map_err(|e| RivetError::io(path, e))?;
        Ok(outcome)
    }

    /// List the files that are missing the header, without writing anything.
    ///
    /// With `strict_check`, a file carrying some other license header still
    /// counts as missing.
    pub fn check(&self, files: &[PathBuf]) -> Result<Vec<PathBuf>, RivetError> {
        let mut missing = Vec::new();
        for path in files {
            let Some((content, style)) = self.load(path)? else {
                continue;
            };
            let rendered = self.template.render(style, self.year);
            let state = header_state(&content, style, &rendered);
            let lacks = match state {
                HeaderState::Expected => false,
                HeaderState::Other { .. } => self.strict_check,
                HeaderState::Missing => true,
            };
            if lacks {
                missing.push(path.clone());
            }
        }
        if !missing.is_empty() {
            warn!(count = missing.len(), "files missing license header");
        }
        Ok(missing)
    }

    /// Read a file that is eligible for a header, or `None` if it is skipped.
    fn load(&self, path: &Path) -> Result<Option<(String, CommentStyle)>, RivetError> {
        if self.excludes(path) {
            return Ok(None);
        }
        let Some(style) = self.styles.style_for(path) else {
            return Ok(None);
        };
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(Some((content, style))),
            Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                warn!(path = %path.display(), "skipping non-UTF-8 file");
                Ok(None)
            }
            Err(e) => Err(RivetError::io(path, e)),
        }
    }

    fn excludes(&self, path: &Path) -> bool {
        let relative = self
            .root
            .as_deref()
            .and_then(|root| path.strip_prefix(root).ok())
            .unwrap_or(path);
        self.exclusions.is_excluded(relative)
    }

    fn skip_reason(&self, path: &Path) -> FileOutcome {
        if self.excludes(path) {
            FileOutcome::Excluded
        } else if self.styles.style_for(path).is_none() {
            FileOutcome::Unmapped
        } else {
            FileOutcome::Unreadable
        }
    }
}

/// Annotate `files` with `template` for the current year, skipping `exclusions`.
///
/// Uses the default comment-style mapping and the skip-existing-headers policy.
pub fn annotate(
    files: &[PathBuf],
    template: &HeaderTemplate,
    exclusions: &ExclusionSet,
) -> Result<usize, RivetError> {
    LicenseAnnotator::new(template.clone(), exclusions.clone()).annotate(files)
}

/// Strict check: list files in `files` that do not start with the exact
/// rendered header, without modifying anything.
pub fn check(
    files: &[PathBuf],
    template: &HeaderTemplate,
    exclusions: &ExclusionSet,
) -> Result<Vec<PathBuf>, RivetError> {
    LicenseAnnotator::new(template.clone(), exclusions.clone())
        .strict_check(true)
        .check(files)
}

/// Recursively list regular files under `root`, sorted by path.
///
/// Paths come back joined onto `root` so they can be opened directly. Give the
/// same `root` to [`LicenseAnnotator::with_root`] so relative exclusion
/// patterns such as `src/gen/**` match.
pub fn collect_files(root: &Path) -> Result<Vec<PathBuf>, RivetError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf());
            let source = e
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("directory walk failed"));
            RivetError::io(path, source)
        })?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}
