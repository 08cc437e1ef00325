//! Guardian decisions.

mod entities;

pub use entities::{DecisionAction, GuardianDecision};
