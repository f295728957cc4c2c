// SPDX-FileCopyrightText: 2026 Rivet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in plugin catalog.
//!
//! Returns hardcoded descriptors for the standard recipe-library plugin
//! family. The two aggregate plugins (`language-library` and
//! `recipe-library`) apply the smaller ones.

use rivet_core::{PluginId, RivetError};

use crate::manifest::PluginDescriptor;
use crate::registry::PluginRegistry;

/// Namespace shared by every built-in plugin id.
pub const BUILTIN_NAMESPACE: &str = "org.openrewrite.build";

const BINDING_PACKAGE: &str = "org.openrewrite.gradle";

/// (short name, display name, description, implementation, tags, applies)
type CatalogRow = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static [&'static str],
    &'static [&'static str],
);

const COMMON_TAGS: &[&str] = &["rewrite", "refactoring"];
const OSS_TAGS: &[&str] = &["rewrite", "refactoring", "oss"];

const CATALOG: &[CatalogRow] = &[
    (
        "language-library",
        "Rewrite language library",
        "Core language module",
        "RewriteLanguageLibraryPlugin",
        COMMON_TAGS,
        &["recipe-repositories", "java-base", "metadata", "publish", "recipe-author-attribution"],
    ),
    (
        "recipe-library-base",
        "Rewrite recipe library base",
        "Builds recipe libraries with the minimum of opinions or conventions about any other aspect \
         of the build. Does not configure artifact repositories or publishing.",
        "RewriteRecipeLibraryBasePlugin",
        COMMON_TAGS,
        &[],
    ),
    (
        "recipe-repositories",
        "Rewrite recipe repositories",
        "Configures the repositories that open source modules draw dependencies from, such as \
         Maven Central and Nexus Snapshots.",
        "RewriteDependencyRepositoriesPlugin",
        OSS_TAGS,
        &[],
    ),
    (
        "recipe-library",
        "Rewrite recipe library",
        "Builds recipe libraries with all the conventions and configuration used in open source \
         repositories, including which repositories to draw from and publish to.",
        "RewriteRecipeLibraryPlugin",
        OSS_TAGS,
        &[
            "recipe-repositories",
            "recipe-library-base",
            "root",
            "java-base",
            "metadata",
            "publish",
            "recipe-author-attribution",
        ],
    ),
    (
        "java-base",
        "Rewrite Java",
        "A module that is built with Java but does not publish artifacts",
        "RewriteJavaPlugin",
        COMMON_TAGS,
        &["recipe-repositories"],
    ),
    (
        "publish",
        "Rewrite Maven publishing",
        "Configures publishing to Maven repositories",
        "RewritePublishPlugin",
        COMMON_TAGS,
        &[],
    ),
    (
        "shadow",
        "Rewrite shadow configuration",
        "Replaces the normal jar task output with the shaded jar without a classifier",
        "RewriteShadowPlugin",
        COMMON_TAGS,
        &[],
    ),
    (
        "metadata",
        "Rewrite metadata configuration",
        "Contacts and SCM data",
        "RewriteMetadataPlugin",
        COMMON_TAGS,
        &[],
    ),
    (
        "java8-text-blocks",
        "Java 8 text blocks",
        "Text blocks compiled to Java 8 bytecode",
        "RewriteJava8TextBlocksPlugin",
        COMMON_TAGS,
        &[],
    ),
    (
        "root",
        "Rewrite root",
        "Configures the root project",
        "RewriteRootProjectPlugin",
        COMMON_TAGS,
        &[],
    ),
    (
        "recipe-author-attribution",
        "Rewrite recipe author attribution",
        "Produces a `/META-INF/rewrite/recipe-authors.yml` file containing recipe author attribution",
        "RewriteRecipeAuthorAttributionPlugin",
        COMMON_TAGS,
        &[],
    ),
    (
        "recipe-examples",
        "Rewrite recipe examples",
        "Produces a `/META-INF/rewrite/recipe-example.yml` file containing recipe examples",
        "RewriteRecipeExamplesPlugin",
        COMMON_TAGS,
        &[],
    ),
    (
        "moderne-source-available-license",
        "Moderne Source Available License",
        "Applies the MSAL to the project",
        "ModerneSourceAvailableLicensePlugin",
        COMMON_TAGS,
        &[],
    ),
    (
        "moderne-proprietary-license",
        "Moderne Proprietary License",
        "Applies the Moderne Proprietary License to the project",
        "ModerneProprietaryLicensePlugin",
        COMMON_TAGS,
        &[],
    ),
];

fn builtin_id(short_name: &str) -> PluginId {
    // Catalog names are fixed and valid.
    PluginId::new(format!("{BUILTIN_NAMESPACE}.{short_name}"))
        .unwrap_or_else(|e| unreachable!("invalid built-in plugin id: {e}"))
}

/// Returns descriptors for all built-in plugins, in catalog order.
pub fn builtin_catalog() -> Vec<PluginDescriptor> {
    CATALOG
        .iter()
        .map(|&(name, display, description, class, tags, applies)| {
            PluginDescriptor::new(
                builtin_id(name),
                display,
                description,
                format!("{BINDING_PACKAGE}.{class}"),
            )
            .with_tags(tags.iter().copied())
            .with_applies(applies.iter().map(|a| builtin_id(a)).collect())
        })
        .collect()
}

/// Build a registry holding the built-in catalog.
pub fn builtin_registry() -> Result<PluginRegistry, RivetError> {
    PluginRegistry::with_plugins(builtin_catalog())
}
