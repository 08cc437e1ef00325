//! Turn extraction from raw message history.
//!
//! Walks the history forward, accumulating assistant text until the next
//! real user message closes a turn. Slash commands and empty user messages
//! are skipped without closing anything, and every user message resets the
//! assistant window, so text from before one user message never leaks into
//! a later turn.

use super::message::{HistoryMessage, MessageContent};
use super::sanitize::strip_channel_metadata;
use super::turn::ConversationTurn;
use serde_json::Value;

/// Result of a history walk, including assistant text that no user message
/// has closed yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnExtraction {
    pub turns: Vec<ConversationTurn>,
    pub trailing_assistant: Option<String>,
}

impl TurnExtraction {
    /// Fold the trailing assistant text into the last emitted turn.
    ///
    /// Dropped when no turn exists yet.
    pub fn attach_trailing(mut self) -> Vec<ConversationTurn> {
        if let (Some(text), Some(last)) = (self.trailing_assistant.take(), self.turns.last_mut()) {
            last.append_assistant(&text);
        }
        self.turns
    }
}

/// Extract turns, discarding assistant text after the last user message.
pub fn extract_turns(history: &[Value]) -> Vec<ConversationTurn> {
    extract_with_trailing(history).turns
}

/// Extract turns and report the unclosed assistant tail separately.
pub fn extract_with_trailing(history: &[Value]) -> TurnExtraction {
    let mut turns = Vec::new();
    let mut pending: Vec<String> = Vec::new();

    for value in history {
        match HistoryMessage::classify(value) {
            HistoryMessage::Assistant(content) => {
                let text = assistant_text(&content);
                if !text.is_empty() {
                    pending.push(text);
                }
            }
            HistoryMessage::User(content) => {
                let Some(user) = user_text(&content) else {
                    continue;
                };
                if is_control_command(&user) {
                    continue;
                }
                turns.push(ConversationTurn {
                    user,
                    assistant: merge_fragments(&mut pending),
                });
            }
            HistoryMessage::Other | HistoryMessage::Malformed => {}
        }
    }

    TurnExtraction {
        turns,
        trailing_assistant: merge_fragments(&mut pending),
    }
}

/// Sanitize a prompt the same way user history is sanitized.
///
/// Returns `None` for prompts that are blank or slash commands.
pub fn sanitize_user_prompt(prompt: &str) -> Option<String> {
    if prompt.trim().is_empty() {
        return None;
    }
    let sanitized = strip_channel_metadata(prompt);
    if sanitized.is_empty() || is_control_command(&sanitized) {
        None
    } else {
        Some(sanitized)
    }
}

fn is_control_command(text: &str) -> bool {
    text.starts_with('/')
}

/// First text block that is still non-empty after sanitization.
fn user_text(content: &MessageContent) -> Option<String> {
    content
        .texts()
        .map(strip_channel_metadata)
        .find(|text| !text.is_empty())
}

fn assistant_text(content: &MessageContent) -> String {
    let joined = content.texts().collect::<Vec<_>>().join("\n");
    strip_channel_metadata(&joined)
}

fn merge_fragments(pending: &mut Vec<String>) -> Option<String> {
    if pending.is_empty() {
        return None;
    }
    let merged = pending.join("\n").trim().to_string();
    pending.clear();
    if merged.is_empty() { None } else { Some(merged) }
}
