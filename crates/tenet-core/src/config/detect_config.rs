//! Ecosystem detection settings.

use serde::{Deserialize, Serialize};

/// Settings for the project & framework detector.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DetectConfig {
    /// Ecosystems the detector may report. Empty = all built-ins enabled.
    pub enabled_ecosystems: Vec<String>,
    /// Explicit detection precedence. Ecosystems named here are tried first,
    /// in order; enabled-but-unlisted ecosystems follow in the compiled-in
    /// default order. Unknown names are ignored.
    pub precedence: Vec<String>,
    /// Skip manifest matching and force this ecosystem.
    pub ecosystem_override: Option<String>,
}
