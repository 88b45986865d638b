//! Ecosystem detection errors.

use std::path::PathBuf;

use super::error_code::{self, TenetErrorCode};

/// Errors raised by project/framework detection.
#[derive(Debug, thiserror::Error)]
pub enum DetectError {
    #[error("No enabled ecosystem matched {} (enabled: {})", .root.display(), .enabled.join(", "))]
    UnsupportedProject { root: PathBuf, enabled: Vec<String> },
}

impl TenetErrorCode for DetectError {
    fn error_code(&self) -> &'static str {
        error_code::UNSUPPORTED_PROJECT
    }
}
