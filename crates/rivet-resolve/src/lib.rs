// SPDX-FileCopyrightText: 2026 Rivet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dependency constraint resolution.
//!
//! Override rules (pin, exclude, substitute) are an explicit ordered list
//! evaluated by a single function, so the last-write-wins tie-break is part
//! of the API rather than an accident of configuration order.

pub mod available;
pub mod cache;
pub mod resolver;
pub mod rule;

pub use available::VersionCatalog;
pub use cache::ResolutionCache;
pub use resolver::{resolve, Resolution, Resolver};
pub use rule::{
    ConstraintTable, ModuleSelector, OverrideRule, RuleKind, RuleTable, VersionConstraint, ANY_ARTIFACT,
};
