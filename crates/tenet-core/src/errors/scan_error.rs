//! File enumeration errors.
//!
//! Per-file read failures during evaluation are not errors; they are
//! demoted to `skipped_files` entries in the report. This enum covers
//! walk-level failures only.

use std::path::PathBuf;

use super::error_code::{self, TenetErrorCode};

/// Errors that can occur while enumerating candidate files.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Cannot walk {}: {}", .root.display(), .message)]
    WalkFailed { root: PathBuf, message: String },

    #[error("Scan cancelled")]
    Cancelled,
}

impl TenetErrorCode for ScanError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Cancelled => error_code::CANCELLED,
            _ => error_code::SCAN_ERROR,
        }
    }
}
