//! Conversation history compaction.
//!
//! Turns a raw, heterogeneous message history into sanitized
//! [`ConversationTurn`]s that the guardian prompt can quote as context.

pub mod extract;
pub mod message;
pub mod sanitize;
pub mod turn;

pub use extract::{TurnExtraction, extract_turns, extract_with_trailing, sanitize_user_prompt};
pub use message::{ContentBlock, HistoryMessage, MessageContent};
pub use sanitize::strip_channel_metadata;
pub use turn::ConversationTurn;
