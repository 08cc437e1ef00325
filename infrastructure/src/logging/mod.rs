//! Decision audit logging.
//!
//! Provides [`JsonlDecisionLogger`], a JSONL file writer that implements
//! the [`DecisionLogger`](guardian_application::DecisionLogger) port.

mod jsonl_decision_logger;

pub use jsonl_decision_logger::JsonlDecisionLogger;
