// SPDX-FileCopyrightText: 2026 Rivet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Header templates and existing-header detection.

use std::path::Path;

use chrono::Datelike;
use rivet_core::RivetError;

use crate::style::CommentStyle;

/// Placeholders replaced with the year when a template is rendered.
const YEAR_PLACEHOLDERS: &[&str] = &["${year}", "{{year}}"];

/// Words whose presence in a leading comment marks an existing header.
const HEADER_MARKERS: &[&str] = &["copyright", "license"];

/// Raw header text, before year substitution and comment wrapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderTemplate {
    text: String,
}

impl HeaderTemplate {
    /// Wrap template text. Blank text fails with `MissingHeaderTemplate`.
    pub fn new(text: impl Into<String>) -> Result<Self, RivetError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(RivetError::MissingHeaderTemplate { path: None });
        }
        Ok(Self { text })
    }

    /// Read a template file. A missing or blank file fails with `MissingHeaderTemplate`.
    pub fn from_file(path: &Path) -> Result<Self, RivetError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(RivetError::MissingHeaderTemplate {
                    path: Some(path.to_path_buf()),
                });
            }
            Err(e) => return Err(RivetError::io(path, e)),
        };
        Self::new(text).map_err(|_| RivetError::MissingHeaderTemplate {
            path: Some(path.to_path_buf()),
        })
    }

    /// Substitute the year placeholders.
    pub fn render_text(&self, year: i32) -> String {
        let year = year.to_string();
        YEAR_PLACEHOLDERS
            .iter()
            .fold(self.text.clone(), |text, placeholder| text.replace(placeholder, &year))
    }

    /// Render the complete comment block for a style.
    pub fn render(&self, style: CommentStyle, year: i32) -> String {
        style.render(&self.render_text(year))
    }
}

/// The current calendar year in local time.
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// Where a file stands relative to the expected header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderState {
    /// Starts with exactly the rendered header.
    Expected,
    /// Starts with some other copyright/license comment block of `len` bytes
    /// (measured after the prelude).
    Other { len: usize },
    /// No recognizable header.
    Missing,
}

/// Classify `content` against the rendered header for its style.
pub fn header_state(content: &str, style: CommentStyle, rendered: &str) -> HeaderState {
    let body = &content[style.prelude_len(content)..];
    let trimmed = body.trim_start_matches(['\n', '\r']);

    if let Some(rest) = trimmed.strip_prefix(rendered.trim_end())
        && (rest.is_empty() || rest.starts_with(['\n', '\r']))
    {
        return HeaderState::Expected;
    }

    match style.leading_block_len(trimmed) {
        Some(len) => {
            let block = trimmed[..len].to_lowercase();
            if HEADER_MARKERS.iter().any(|m| block.contains(m)) {
                HeaderState::Other {
                    len: len + (body.len() - trimmed.len()),
                }
            } else {
                HeaderState::Missing
            }
        }
        None => HeaderState::Missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const APACHE: &str = "Copyright ${year} the original author or authors.\n\nLicensed under the Apache License, Version 2.0";

    #[test]
    fn blank_template_is_missing() {
        assert!(matches!(
            HeaderTemplate::new("  \n"),
            Err(RivetError::MissingHeaderTemplate { path: None })
        ));
    }

    #[test]
    fn missing_template_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("licenseHeader.txt");
        match HeaderTemplate::from_file(&path) {
            Err(RivetError::MissingHeaderTemplate { path: Some(p) }) => assert_eq!(p, path),
            other => panic!("expected missing template, got {other:?}"),
        }
    }

    #[test]
    fn render_substitutes_year() {
        let template = HeaderTemplate::new("Copyright ${year} / {{year}}").unwrap();
        assert_eq!(template.render_text(2031), "Copyright 2031 / 2031");
    }

    #[test]
    fn detects_expected_header() {
        let template = HeaderTemplate::new(APACHE).unwrap();
        let rendered = template.render(CommentStyle::SlashstarStyle, 2026);
        let content = format!("{rendered}package a;\n");
        assert_eq!(
            header_state(&content, CommentStyle::SlashstarStyle, &rendered),
            HeaderState::Expected
        );
    }

    #[test]
    fn code_on_the_closing_line_is_not_the_expected_header() {
        let rendered = HeaderTemplate::new(APACHE)
            .unwrap()
            .render(CommentStyle::SlashstarStyle, 2026);
        let content = format!("{} package a;\n", rendered.trim_end());
        assert!(matches!(
            header_state(&content, CommentStyle::SlashstarStyle, &rendered),
            HeaderState::Other { .. }
        ));
    }

    #[test]
    fn detects_foreign_license_header() {
        let rendered = HeaderTemplate::new(APACHE)
            .unwrap()
            .render(CommentStyle::SlashstarStyle, 2026);
        let content = "/*\n * (c) 2019 Someone. MIT License.\n */\npackage a;\n";
        assert_eq!(
            header_state(content, CommentStyle::SlashstarStyle, &rendered),
            HeaderState::Other { len: 41 }
        );
    }

    #[test]
    fn plain_comment_is_not_a_header() {
        let rendered = HeaderTemplate::new(APACHE)
            .unwrap()
            .render(CommentStyle::SlashstarStyle, 2026);
        let content = "/* helper utilities */\nclass A {}\n";
        assert_eq!(
            header_state(content, CommentStyle::SlashstarStyle, &rendered),
            HeaderState::Missing
        );
    }

    #[test]
    fn header_after_shebang_is_found() {
        let rendered = HeaderTemplate::new("Copyright 2026")
            .unwrap()
            .render(CommentStyle::ScriptStyle, 2026);
        let content = format!("#!/bin/sh\n{rendered}echo hi\n");
        assert_eq!(
            header_state(&content, CommentStyle::ScriptStyle, &rendered),
            HeaderState::Expected
        );
    }
}
