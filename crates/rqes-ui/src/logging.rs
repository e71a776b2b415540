//! # Diagnostic Logging
//!
//! Screens and workflows report through a [`LogController`] so that hosts can
//! silence the SDK with a single configuration flag. The default controller
//! forwards to `tracing`; installing a subscriber is left to the host, or to
//! [`init_tracing`] behind the `subscriber` feature.

use std::fmt::Display;

/// Tracing target used for every SDK diagnostic.
pub const LOG_TARGET: &str = "rqes_ui";

/// Sink for SDK diagnostics.
pub trait LogController: Send + Sync {
    /// Record an error.
    fn log_error(&self, error: &dyn Display);

    /// Record a message.
    fn log(&self, description: &str);
}

/// [`LogController`] that emits `tracing` events when enabled.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLogController {
    enabled: bool,
}

impl TracingLogController {
    /// Create a controller; `enabled` normally comes from `print_logs`.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Whether events are emitted.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl LogController for TracingLogController {
    fn log_error(&self, error: &dyn Display) {
        if self.enabled {
            tracing::error!(target: LOG_TARGET, error = %error);
        }
    }

    fn log(&self, description: &str) {
        if self.enabled {
            tracing::info!(target: LOG_TARGET, "{description}");
        }
    }
}

/// Install a global `fmt` subscriber filtered by `filter` (e.g. `"rqes_ui=debug"`).
///
/// Returns `false` when a global subscriber was already installed.
#[cfg(feature = "subscriber")]
pub fn init_tracing(filter: &str) -> bool {
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_controller_flag() {
        let quiet = TracingLogController::default();
        assert!(!quiet.is_enabled());
        quiet.log("not emitted");
        quiet.log_error(&"not emitted");

        let loud = TracingLogController::new(true);
        assert!(loud.is_enabled());
        loud.log("emitted");
    }

    #[cfg(feature = "subscriber")]
    #[test]
    fn test_init_tracing_is_idempotent() {
        let _ = init_tracing("rqes_ui=debug");
        assert!(!init_tracing("rqes_ui=debug"));
    }
}
