//! Application layer for intent-guardian
//!
//! This crate contains use cases, port definitions, the in-memory caches,
//! and the resolved guardian configuration. It depends only on the domain
//! layer.

pub mod cache;
pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use cache::{CachedDecision, CachedMessages, DecisionCache, GuardianCaches, TurnCache};
pub use config::GuardianConfig;
pub use ports::{
    clock::{Clock, ManualClock, SystemClock},
    decision_logger::{DecisionEvent, DecisionLogger, NoDecisionLogger},
    guardian_model::{GuardianModel, GuardianModelRequest},
    llm_gateway::{CompletionRequest, GatewayError, LlmGateway},
};
pub use use_cases::UNRESOLVED_SESSION_KEY;
pub use use_cases::call_guardian_model::GatewayGuardianModel;
pub use use_cases::record_turns::{AgentInput, RecordTurnsUseCase};
pub use use_cases::review_tool_call::{ReviewOutcome, ReviewState, ReviewToolCallUseCase};
