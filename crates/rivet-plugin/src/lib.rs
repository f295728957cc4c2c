// SPDX-FileCopyrightText: 2026 Rivet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin registry, descriptor parser, and built-in plugin catalog.
//!
//! Each build plugin is described by a [`PluginDescriptor`] naming its
//! identifier, metadata, opaque implementation binding and the plugins it
//! applies. The [`PluginRegistry`] stores descriptors by id and expands a
//! requested plugin into its full application order.

pub mod catalog;
pub mod manifest;
pub mod registry;

pub use catalog::{builtin_catalog, builtin_registry, BUILTIN_NAMESPACE};
pub use manifest::{parse_plugin_manifest, PluginDescriptor, PluginTable};
pub use registry::PluginRegistry;
