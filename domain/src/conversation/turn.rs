//! Conversation turn entity

use serde::{Deserialize, Serialize};

/// One user utterance plus the assistant text that preceded it.
///
/// `assistant` is the merged output produced since the previous user
/// message. `user` is always non-empty, sanitized, and never a slash command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub user: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assistant: Option<String>,
}

impl ConversationTurn {
    pub fn user(user: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            assistant: None,
        }
    }

    pub fn with_assistant(mut self, assistant: impl Into<String>) -> Self {
        self.assistant = Some(assistant.into());
        self
    }

    /// Append assistant text after whatever is already recorded.
    pub fn append_assistant(&mut self, text: &str) {
        self.assistant = Some(match self.assistant.take() {
            Some(existing) => format!("{}\n{}", existing, text),
            None => text.to_string(),
        });
    }
}
