//! Decision value objects

use crate::config::FallbackPolicy;
use serde::{Deserialize, Serialize};

/// Allow or block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionAction {
    Allow,
    Block,
}

impl DecisionAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionAction::Allow => "allow",
            DecisionAction::Block => "block",
        }
    }
}

impl From<FallbackPolicy> for DecisionAction {
    fn from(policy: FallbackPolicy) -> Self {
        match policy {
            FallbackPolicy::Allow => DecisionAction::Allow,
            FallbackPolicy::Block => DecisionAction::Block,
        }
    }
}

impl std::fmt::Display for DecisionAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Terminal output of one review, independent of caching and mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardianDecision {
    pub action: DecisionAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl GuardianDecision {
    pub fn allow(reason: Option<String>) -> Self {
        Self {
            action: DecisionAction::Allow,
            reason,
        }
    }

    pub fn block(reason: impl Into<String>) -> Self {
        Self {
            action: DecisionAction::Block,
            reason: Some(reason.into()),
        }
    }

    /// Decision substituted when the model cannot be consulted or understood.
    pub fn fallback(policy: FallbackPolicy, reason: impl Into<String>) -> Self {
        Self {
            action: policy.into(),
            reason: Some(reason.into()),
        }
    }

    pub fn is_block(&self) -> bool {
        self.action == DecisionAction::Block
    }

    pub fn reason_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.reason.as_deref().unwrap_or(default)
    }
}
