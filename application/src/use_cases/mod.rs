//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod call_guardian_model;
pub mod record_turns;
pub mod review_tool_call;
pub(crate) mod shared;

pub use shared::UNRESOLVED_SESSION_KEY;
