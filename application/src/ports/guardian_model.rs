//! Guardian model port.
//!
//! [`GuardianModel`] is the model-invocation collaborator of the review
//! pipeline. Unlike [`LlmGateway`](super::llm_gateway::LlmGateway) it never
//! fails: every network error, timeout, or unusable answer is folded into
//! the configured fallback decision.

use async_trait::async_trait;
use guardian_domain::{FallbackPolicy, GuardianDecision, Model};
use std::time::Duration;

/// Everything one guardian consultation needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardianModelRequest {
    pub model: Model,
    pub system_prompt: String,
    pub user_prompt: String,
    pub timeout: Duration,
    pub fallback: FallbackPolicy,
}

/// Port for asking the policy-evaluation model for a verdict.
#[async_trait]
pub trait GuardianModel: Send + Sync {
    /// Consult the model. Always resolves to a decision.
    async fn call(&self, request: &GuardianModelRequest) -> GuardianDecision;
}
