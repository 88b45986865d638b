//! File enumeration — parallel discovery with deterministic ordering.
//!
//! `full` mode returns every candidate file; `quick` mode returns a
//! deterministic bounded sample (first N files per directory in
//! lexicographic path order). If every active rule declares a
//! `file_pattern`, the union of those globs is applied as a whitelist
//! during the walk.

pub mod cancellation;
pub mod sample;
pub mod walker;

use std::path::{Path, PathBuf};

use tenet_core::config::{AuditMode, ScanConfig};
use tenet_core::errors::ScanError;

use crate::rules::ActiveRuleSet;

pub use cancellation::{RunDeadline, ScanCancellation};

/// The enumerator's output: a sorted candidate file list plus statistics.
#[derive(Debug, Clone)]
pub struct Enumeration {
    /// Candidate files, sorted by path.
    pub files: Vec<PathBuf>,
    /// Files discovered before quick-mode sampling.
    pub discovered: usize,
}

/// The file enumerator.
pub struct Scanner {
    config: ScanConfig,
    cancellation: ScanCancellation,
}

impl Scanner {
    pub fn new(config: ScanConfig) -> Self {
        Self {
            config,
            cancellation: ScanCancellation::new(),
        }
    }

    /// Cancellation handle for external cancellation.
    pub fn cancellation(&self) -> &ScanCancellation {
        &self.cancellation
    }

    /// Enumerate candidate files under `root`.
    pub fn enumerate(
        &self,
        root: &Path,
        mode: AuditMode,
        active: &ActiveRuleSet,
    ) -> Result<Enumeration, ScanError> {
        let include = active.include_globs();
        let files = walker::walk_directory(
            root,
            &self.config,
            include.as_deref(),
            self.cancellation.as_atomic(),
        )?;
        if self.cancellation.is_cancelled() {
            return Err(ScanError::Cancelled);
        }
        let discovered = files.len();

        let files = match mode {
            AuditMode::Full => files,
            AuditMode::Quick => {
                sample::sample_per_directory(files, self.config.effective_quick_sample())
            }
        };

        tracing::debug!(
            discovered,
            enumerated = files.len(),
            %mode,
            "enumeration complete"
        );

        Ok(Enumeration { files, discovered })
    }
}
