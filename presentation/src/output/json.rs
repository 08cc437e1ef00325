//! JSON output formatter

use crate::output::formatter::OutputFormatter;
use guardian_application::{GuardianConfig, ReviewOutcome};
use guardian_domain::{ConversationTurn, DecisionAction};
use serde_json::json;

/// Formats results as pretty-printed JSON
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_review(&self, tool_name: &str, outcome: &ReviewOutcome) -> String {
        let verdict = outcome
            .decision
            .as_ref()
            .map_or(DecisionAction::Allow, |d| d.action);
        let value = json!({
            "tool_name": tool_name,
            "state": outcome.state.as_str(),
            "verdict": verdict,
            "blocked": outcome.is_blocked(),
            "reason": outcome.decision.as_ref().and_then(|d| d.reason.clone()),
        });
        pretty(&value)
    }

    fn format_turns(&self, turns: &[ConversationTurn]) -> String {
        pretty(&json!(turns))
    }

    fn format_config(&self, config: &GuardianConfig) -> String {
        let value = json!({
            "model": config.model.to_string(),
            "watched_tools": config.watched_tools.sorted(),
            "timeout_ms": config.timeout.as_millis() as u64,
            "fallback_on_error": config.fallback_on_error,
            "log_decisions": config.log_decisions,
            "mode": config.mode,
            "max_recent_turns": config.max_recent_turns,
            "max_arg_length": config.max_arg_length,
        });
        pretty(&value)
    }
}

fn pretty(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}
