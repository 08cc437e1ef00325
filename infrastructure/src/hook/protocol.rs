//! Hook protocol message types.
//!
//! Newline-delimited JSON in both directions. Inbound lines are tagged by
//! `type`:
//!
//! ```text
//! {"type":"agent_input","session_key":"chat-1","history":[...],"prompt":"send it"}
//! {"type":"tool_call","id":7,"session_key":"chat-1","tool_name":"exec","args":{...}}
//! ```
//!
//! Every tool call gets exactly one response line carrying its `id`:
//!
//! ```text
//! {"id":7,"action":"block","reason":"user only asked to read"}
//! ```
//!
//! A line that cannot be parsed gets `{"type":"error","message":"..."}`.

use guardian_application::{AgentInput, ReviewOutcome};
use guardian_domain::{DecisionAction, ToolCallRequest};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur on the hook transport
#[derive(Error, Debug)]
pub enum HookProtocolError {
    #[error("Invalid hook event: {0}")]
    InvalidEvent(#[from] serde_json::Error),

    #[error("Hook transport I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Hook writer task failed: {0}")]
    WriterTask(String),
}

/// One inbound line.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HookEvent {
    AgentInput(AgentInput),
    ToolCall(ToolCallEvent),
}

/// A candidate tool invocation awaiting a verdict.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ToolCallEvent {
    /// Correlation id echoed in the response (string or number).
    pub id: Value,
    #[serde(flatten)]
    pub request: ToolCallRequest,
}

/// One outbound line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum HookResponse {
    Decision {
        id: Value,
        action: DecisionAction,
        #[serde(skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
    Error {
        #[serde(rename = "type")]
        kind: &'static str,
        message: String,
    },
}

impl HookResponse {
    /// `block` only when the review says the call must not run.
    pub fn decision(id: Value, outcome: &ReviewOutcome) -> Self {
        match &outcome.block_reason {
            Some(reason) => HookResponse::Decision {
                id,
                action: DecisionAction::Block,
                reason: Some(reason.clone()),
            },
            None => HookResponse::Decision {
                id,
                action: DecisionAction::Allow,
                reason: None,
            },
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        HookResponse::Error {
            kind: "error",
            message: message.into(),
        }
    }
}

pub fn parse_event(line: &str) -> Result<HookEvent, HookProtocolError> {
    Ok(serde_json::from_str(line)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use guardian_application::ReviewState;
    use guardian_domain::GuardianDecision;
    use serde_json::json;

    #[test]
    fn test_parse_agent_input() {
        let event = parse_event(
            r#"{"type":"agent_input","session_key":"s1","history":[{"role":"user","content":"hi"}],"prompt":"go"}"#,
        )
        .unwrap();
        let HookEvent::AgentInput(input) = event else {
            panic!("expected agent_input");
        };
        assert_eq!(input.session_key.as_deref(), Some("s1"));
        assert_eq!(input.history.len(), 1);
        assert_eq!(input.prompt.as_deref(), Some("go"));
    }

    #[test]
    fn test_parse_tool_call() {
        let event = parse_event(
            r#"{"type":"tool_call","id":"c-1","tool_name":"exec","args":{"command":"ls"}}"#,
        )
        .unwrap();
        let HookEvent::ToolCall(call) = event else {
            panic!("expected tool_call");
        };
        assert_eq!(call.id, json!("c-1"));
        assert_eq!(call.request.tool_name, "exec");
        assert_eq!(call.request.args, json!({"command": "ls"}));
        assert_eq!(call.request.session_key, None);
    }

    #[test]
    fn test_tool_call_without_args() {
        let event = parse_event(r#"{"type":"tool_call","id":3,"tool_name":"cron"}"#).unwrap();
        let HookEvent::ToolCall(call) = event else {
            panic!("expected tool_call");
        };
        assert_eq!(call.request.args, Value::Null);
    }

    #[test]
    fn test_rejects_malformed_lines() {
        assert!(parse_event("not json").is_err());
        assert!(parse_event(r#"{"type":"shutdown"}"#).is_err());
        assert!(parse_event(r#"{"type":"tool_call","id":1}"#).is_err());
    }

    #[test]
    fn test_block_response() {
        let outcome = ReviewOutcome {
            state: ReviewState::Reviewed,
            decision: Some(GuardianDecision::block("not requested")),
            block_reason: Some("not requested".to_string()),
        };
        let json = serde_json::to_value(HookResponse::decision(json!(7), &outcome)).unwrap();
        assert_eq!(
            json,
            json!({"id": 7, "action": "block", "reason": "not requested"})
        );
    }

    #[test]
    fn test_audited_block_is_allow() {
        let outcome = ReviewOutcome {
            state: ReviewState::Reviewed,
            decision: Some(GuardianDecision::block("not requested")),
            block_reason: None,
        };
        let json = serde_json::to_value(HookResponse::decision(json!("a"), &outcome)).unwrap();
        assert_eq!(json, json!({"id": "a", "action": "allow"}));
    }

    #[test]
    fn test_error_response() {
        let json = serde_json::to_value(HookResponse::error("bad line")).unwrap();
        assert_eq!(json, json!({"type": "error", "message": "bad line"}));
    }
}
