//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the Tenet tracing/logging system.
///
/// Reads the `TENET_LOG` environment variable for per-subsystem log levels,
/// e.g. `TENET_LOG=tenet_audit::scanner=debug,tenet_audit=info`.
/// Falls back to `tenet=info` if `TENET_LOG` is not set or is invalid.
///
/// Idempotent; calling it multiple times is safe.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("TENET_LOG")
            .unwrap_or_else(|_| EnvFilter::new("tenet=info"));

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true))
            .with(filter)
            .init();
    });
}
