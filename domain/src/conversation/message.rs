//! Tolerant classification of raw history messages.
//!
//! History arrives from the hosting runtime as untyped JSON. Rather than
//! probing fields ad hoc at every use site, each value is classified once
//! into a [`HistoryMessage`] whose content is a list of [`ContentBlock`]s.
//! Classification is total: anything that does not look like a message
//! becomes [`HistoryMessage::Malformed`] instead of an error.

use serde_json::Value;

/// A single piece of message content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentBlock {
    /// Plain text (either a bare string content or a `{"type":"text"}` block)
    Text(String),
    /// Anything else: tool invocations, tool results, images, ...
    Unsupported,
}

/// Message content as a sequence of blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageContent {
    pub blocks: Vec<ContentBlock>,
}

impl MessageContent {
    /// Content given as a bare string
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            blocks: vec![ContentBlock::Text(text.into())],
        }
    }

    pub fn from_blocks(blocks: Vec<ContentBlock>) -> Self {
        Self { blocks }
    }

    /// Text blocks in order, skipping unsupported ones.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().filter_map(|block| match block {
            ContentBlock::Text(text) => Some(text.as_str()),
            ContentBlock::Unsupported => None,
        })
    }

    fn from_value(value: Option<&Value>) -> Self {
        match value {
            Some(Value::String(text)) => Self::text(text.clone()),
            Some(Value::Array(items)) => Self::from_blocks(items.iter().map(classify_block).collect()),
            _ => Self::default(),
        }
    }
}

fn classify_block(value: &Value) -> ContentBlock {
    let is_text = value.get("type").and_then(Value::as_str) == Some("text");
    match value.get("text").and_then(Value::as_str) {
        Some(text) if is_text => ContentBlock::Text(text.to_string()),
        _ => ContentBlock::Unsupported,
    }
}

/// A classified history entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryMessage {
    User(MessageContent),
    Assistant(MessageContent),
    /// A well-formed message with another role (system, tool, ...)
    Other,
    /// Not an object, or an object without a string `role`
    Malformed,
}

impl HistoryMessage {
    /// Classify an arbitrary JSON value.
    pub fn classify(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return HistoryMessage::Malformed;
        };
        let Some(role) = object.get("role").and_then(Value::as_str) else {
            return HistoryMessage::Malformed;
        };
        let content = MessageContent::from_value(object.get("content"));
        match role {
            "user" => HistoryMessage::User(content),
            "assistant" => HistoryMessage::Assistant(content),
            _ => HistoryMessage::Other,
        }
    }
}
