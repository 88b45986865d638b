//! File enumeration settings.

use serde::{Deserialize, Serialize};

/// Enumeration depth for one audit run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AuditMode {
    /// Deterministic bounded sample: the first N files per directory in
    /// lexicographic path order.
    Quick,
    /// Exhaustive enumeration.
    #[default]
    Full,
}

impl std::fmt::Display for AuditMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Quick => write!(f, "quick"),
            Self::Full => write!(f, "full"),
        }
    }
}

/// Settings for the file enumerator.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScanConfig {
    /// Files taken per directory in quick mode. Default 5.
    pub quick_sample_per_dir: Option<usize>,
    /// Files larger than this are never enumerated. Default 2 MiB.
    pub max_file_size: Option<u64>,
    /// Walker threads. 0 = one per core. Default 0.
    pub threads: Option<usize>,
    /// Extra ignore patterns (gitignore syntax), applied after the defaults.
    pub extra_ignore: Vec<String>,
    /// Follow symlinks while walking. Default false.
    pub follow_symlinks: Option<bool>,
    /// Run-level deadline in milliseconds. Files not evaluated when it fires
    /// are recorded as skipped with reason "timeout".
    pub deadline_ms: Option<u64>,
}

impl ScanConfig {
    pub fn effective_quick_sample(&self) -> usize {
        self.quick_sample_per_dir.unwrap_or(5)
    }

    pub fn effective_max_file_size(&self) -> u64 {
        self.max_file_size.unwrap_or(2 * 1024 * 1024)
    }

    pub fn effective_threads(&self) -> usize {
        self.threads.unwrap_or(0)
    }
}
