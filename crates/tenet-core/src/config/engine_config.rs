//! Engine-wide settings owned by the orchestration layer.

use serde::{Deserialize, Serialize};

/// Configuration resolution scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EngineMode {
    /// Read the project `tenet.toml` layer and `.tenet/rules/`.
    #[default]
    Project,
    /// User-level config and built-in rule packs only.
    Global,
}

/// Engine-level settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    pub mode: Option<EngineMode>,
    /// Consumed by host integrations: run an audit as soon as a session
    /// opens. The engine itself only carries the value.
    pub auto_audit_on_start: Option<bool>,
}

impl EngineConfig {
    pub fn effective_mode(&self) -> EngineMode {
        self.mode.unwrap_or_default()
    }
}
