//! Tool call entities seen by the guardian

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A candidate tool invocation intercepted before it runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallRequest {
    /// Name of the tool the agent wants to call
    pub tool_name: String,
    /// Raw arguments, untrusted
    #[serde(default)]
    pub args: serde_json::Value,
    /// Session the call belongs to; `None` when the runtime could not say
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_key: Option<String>,
}

impl ToolCallRequest {
    pub fn new(tool_name: impl Into<String>, args: serde_json::Value) -> Self {
        Self {
            tool_name: tool_name.into(),
            args,
            session_key: None,
        }
    }

    pub fn with_session(mut self, session_key: impl Into<String>) -> Self {
        self.session_key = Some(session_key.into());
        self
    }

    /// Lowercased tool name used for matching and cache keys
    pub fn normalized_name(&self) -> String {
        self.tool_name.to_lowercase()
    }
}

/// Set of tool names subject to review, matched case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WatchedTools {
    names: HashSet<String>,
}

impl WatchedTools {
    /// Tools reviewed when nothing else is configured: outbound messaging,
    /// shell execution, file mutation, and runtime reconfiguration.
    pub const DEFAULT: &'static [&'static str] = &[
        "message",
        "sessions_send",
        "exec",
        "write",
        "edit",
        "gateway",
        "cron",
    ];

    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names
                .into_iter()
                .map(|n| n.as_ref().trim().to_lowercase())
                .filter(|n| !n.is_empty())
                .collect(),
        }
    }

    pub fn contains(&self, tool_name: &str) -> bool {
        self.names.contains(&tool_name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names in sorted order, for display
    pub fn sorted(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.names.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
