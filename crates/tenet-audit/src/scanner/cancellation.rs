//! Run interruption: external cancellation and the run-level deadline.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Cooperative stop flag for an in-flight enumeration.
///
/// Walker threads observe the flag between directory entries; `enumerate`
/// surfaces a cancelled walk as `ScanError::Cancelled` instead of handing
/// a truncated file list to the evaluator.
#[derive(Debug, Clone, Default)]
pub struct ScanCancellation {
    flag: Arc<AtomicBool>,
}

impl ScanCancellation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the walk to stop at the next directory entry.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    pub(crate) fn as_atomic(&self) -> &AtomicBool {
        &self.flag
    }
}

/// Run-level deadline. Files not yet evaluated when it fires are recorded
/// as skipped with reason "timeout", never silently dropped.
#[derive(Debug, Clone, Copy)]
pub struct RunDeadline {
    expires_at: Option<Instant>,
}

impl RunDeadline {
    /// A deadline `budget` from now, or an unbounded deadline for `None`.
    pub fn starting_now(budget: Option<Duration>) -> Self {
        Self {
            expires_at: budget.map(|d| Instant::now() + d),
        }
    }

    /// Whether the deadline has fired.
    pub fn expired(&self) -> bool {
        self.expires_at.is_some_and(|at| Instant::now() >= at)
    }
}
