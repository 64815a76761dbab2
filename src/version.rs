// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for the Artifice stylizer

/// Full version string with feature description
pub const VERSION: &str = "v1.0.0-three-styles-2025-10-20";

/// Semantic version number
pub const VERSION_NUMBER: &str = env!("CARGO_PKG_VERSION");

/// Build date
pub const BUILD_DATE: &str = "2025-10-20";

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "whitebox-cartoonizer",
    "pencil-sketch",
    "oil-painting",
    "strict-style-validation",
    "legacy-style-fallback",
    "hf-hub-model-download",
];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("Artifice Stylizer {} ({})", VERSION_NUMBER, BUILD_DATE)
}
