//! Port for structured decision logging.
//!
//! Defines the [`DecisionLogger`] trait for recording guardian decisions to
//! an audit log. This is separate from `tracing`-based operation logs:
//! tracing handles human-readable diagnostics, while this port captures
//! every decision with its full context in a machine-readable format (JSONL).

use serde_json::Value;

/// A structured decision event for logging.
pub struct DecisionEvent {
    /// Event type identifier (e.g., "guardian_decision", "guardian_block").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl DecisionEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging decision events.
///
/// `log` is synchronous and non-fallible so that logging can never change
/// or delay a decision; write failures are ignored.
pub trait DecisionLogger: Send + Sync {
    fn log(&self, event: DecisionEvent);
}

/// No-op implementation for tests and when no audit log is configured.
pub struct NoDecisionLogger;

impl DecisionLogger for NoDecisionLogger {
    fn log(&self, _event: DecisionEvent) {}
}
