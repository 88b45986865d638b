//! Umbrella error for a full audit run.

use super::error_code::TenetErrorCode;
use super::{ConfigError, DetectError, RuleError, ScanError};

/// Any fatal error an audit run can surface to callers.
///
/// Deadline expiry is deliberately absent: a timed-out run still returns a
/// best-effort `ScoreReport` with `stats.timed_out` set.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Rules(#[from] RuleError),

    #[error(transparent)]
    Detect(#[from] DetectError),

    #[error(transparent)]
    Scan(#[from] ScanError),
}

impl EngineError {
    /// Process exit code for CLI wrappers.
    ///
    /// `0` report emitted, `1` config or rule document invalid, `2` no
    /// supported ecosystem, `3` deadline fired (mapped by the CLI from the
    /// report, not from this enum).
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Rules(_) | Self::Scan(_) => 1,
            Self::Detect(_) => 2,
        }
    }
}

impl TenetErrorCode for EngineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Rules(e) => e.error_code(),
            Self::Detect(e) => e.error_code(),
            Self::Scan(e) => e.error_code(),
        }
    }
}
