//! Diagnostic reporting channel
//!
//! Non-fatal conditions (stripped configuration attributes, errors absorbed
//! by default hooks) are reported through a sink rather than returned to the
//! caller. The default sink forwards to `tracing`; embedders and tests can
//! install [`MemorySink`] to capture messages.

use std::sync::Mutex;

/// Warning/error reporting channel for non-fatal conditions.
pub trait DiagnosticSink: Send + Sync {
    /// Report a non-fatal warning.
    fn warn(&self, message: &str);

    /// Report an error that was absorbed rather than propagated.
    fn error(&self, message: &str);
}

/// Default sink: forwards to `tracing` at the matching level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn warn(&self, message: &str) {
        tracing::warn!("{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!("{message}");
    }
}

/// Recording sink for tests and embedders that capture diagnostics.
#[derive(Debug, Default)]
pub struct MemorySink {
    warnings: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
}

impl MemorySink {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// All warnings recorded so far, oldest first.
    pub fn warnings(&self) -> Vec<String> {
        self.warnings
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// All errors recorded so far, oldest first.
    pub fn errors(&self) -> Vec<String> {
        self.errors
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl DiagnosticSink for MemorySink {
    fn warn(&self, message: &str) {
        self.warnings
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.errors
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(message.to_string());
    }
}
