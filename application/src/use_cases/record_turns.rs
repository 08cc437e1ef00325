//! Record Turns use case.
//!
//! Runs once per agent input cycle: compacts the full history plus the
//! in-flight prompt into turns and replaces the session's cache entry.

use crate::cache::GuardianCaches;
use crate::use_cases::shared::resolve_session_key;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// One agent input cycle as delivered by the hosting runtime.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AgentInput {
    #[serde(default)]
    pub session_key: Option<String>,
    #[serde(default)]
    pub history: Vec<Value>,
    #[serde(default)]
    pub prompt: Option<String>,
}

impl AgentInput {
    pub fn new(history: Vec<Value>) -> Self {
        Self {
            history,
            ..Self::default()
        }
    }

    pub fn with_session(mut self, session_key: impl Into<String>) -> Self {
        self.session_key = Some(session_key.into());
        self
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }
}

pub struct RecordTurnsUseCase {
    caches: Arc<GuardianCaches>,
    max_turns: usize,
}

impl RecordTurnsUseCase {
    pub fn new(caches: Arc<GuardianCaches>, max_turns: usize) -> Self {
        Self {
            caches,
            max_turns: max_turns.max(1),
        }
    }

    /// Replace the session's cached turns. Returns how many were stored.
    pub fn execute(&self, input: &AgentInput) -> usize {
        let session = resolve_session_key(input.session_key.as_deref());
        let mut turns = self.caches.turns();
        turns.update(
            &session.key,
            &input.history,
            input.prompt.as_deref(),
            self.max_turns,
        );
        let stored = turns.get(&session.key).len();
        debug!(
            "Recorded {} turn(s) for session {} from {} history message(s)",
            stored,
            session.key,
            input.history.len()
        );
        stored
    }
}
