//! Rule repository settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// How authored severities are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    /// Severities reported as authored.
    #[default]
    Strict,
    /// `error` findings are downgraded one level to `warning`.
    Advisory,
}

/// Settings for rule document loading.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RulesConfig {
    pub strictness: Option<Strictness>,
    /// Directory of project rule documents. Default `.tenet/rules` under the
    /// audited root. Documents here override built-ins by ecosystem name.
    pub custom_dir: Option<PathBuf>,
}

impl RulesConfig {
    pub fn effective_strictness(&self) -> Strictness {
        self.strictness.unwrap_or_default()
    }
}
