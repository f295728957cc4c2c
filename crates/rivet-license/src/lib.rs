// SPDX-FileCopyrightText: 2026 Rivet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! License header management for Rivet.
//!
//! Renders a header template in the comment syntax of each file type,
//! detects headers that are already present, and prepends the header to
//! files that lack one.

pub mod annotator;
pub mod header;
pub mod style;

pub use annotator::{
    DEFAULT_EXCLUDES, ExclusionSet, FileOutcome, LicenseAnnotator, annotate, check, collect_files,
};
pub use header::{HeaderState, HeaderTemplate, current_year, header_state};
pub use style::{CommentStyle, StyleMapping};
