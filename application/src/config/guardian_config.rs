//! Guardian review configuration.
//!
//! [`GuardianConfig`] is the resolved, validated form of the `[guardian]`
//! config section. Raw file values are normalized by the infrastructure
//! layer before they reach this type, so every field here is usable as-is.

use guardian_domain::{FallbackPolicy, GuardianMode, Model, WatchedTools};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardianConfig {
    /// Policy-evaluation model.
    pub model: Model,
    /// Tools subject to review; all others bypass the guardian.
    pub watched_tools: WatchedTools,
    /// Upper bound for one model consultation.
    pub timeout: Duration,
    /// Decision used when the model cannot be consulted or understood.
    pub fallback_on_error: FallbackPolicy,
    /// Emit per-decision log lines and audit events.
    pub log_decisions: bool,
    /// Enforce blocks, or only log them.
    pub mode: GuardianMode,
    /// Turns of context retained per session.
    pub max_recent_turns: usize,
    /// Characters of serialized tool arguments shown to the model.
    pub max_arg_length: usize,
}

impl GuardianConfig {
    pub const DEFAULT_TIMEOUT_MS: u64 = 20_000;
    pub const DEFAULT_MAX_RECENT_TURNS: usize = 3;
    pub const DEFAULT_MAX_ARG_LENGTH: usize = 500;

    // ==================== Builder Methods ====================

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    pub fn with_watched_tools(mut self, watched_tools: WatchedTools) -> Self {
        self.watched_tools = watched_tools;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_fallback(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback_on_error = fallback;
        self
    }

    pub fn with_mode(mut self, mode: GuardianMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_log_decisions(mut self, log_decisions: bool) -> Self {
        self.log_decisions = log_decisions;
        self
    }

    pub fn with_max_recent_turns(mut self, max: usize) -> Self {
        self.max_recent_turns = max.max(1);
        self
    }

    pub fn with_max_arg_length(mut self, max: usize) -> Self {
        self.max_arg_length = max.max(1);
        self
    }
}

impl Default for GuardianConfig {
    fn default() -> Self {
        Self {
            model: Model::default(),
            watched_tools: WatchedTools::new(WatchedTools::DEFAULT),
            timeout: Duration::from_millis(Self::DEFAULT_TIMEOUT_MS),
            fallback_on_error: FallbackPolicy::Allow,
            log_decisions: true,
            mode: GuardianMode::Enforce,
            max_recent_turns: Self::DEFAULT_MAX_RECENT_TURNS,
            max_arg_length: Self::DEFAULT_MAX_ARG_LENGTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GuardianConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(20));
        assert_eq!(config.fallback_on_error, FallbackPolicy::Allow);
        assert_eq!(config.mode, GuardianMode::Enforce);
        assert!(config.log_decisions);
        assert!(config.watched_tools.contains("exec"));
        assert!(!config.watched_tools.contains("read"));
    }

    #[test]
    fn test_builder_clamps_zero_limits() {
        let config = GuardianConfig::default()
            .with_max_recent_turns(0)
            .with_max_arg_length(0);
        assert_eq!(config.max_recent_turns, 1);
        assert_eq!(config.max_arg_length, 1);
    }
}
