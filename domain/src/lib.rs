//! Domain layer for intent-guardian
//!
//! This crate contains the core decision logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Turns
//!
//! A [`ConversationTurn`] is one user utterance plus the assistant text that
//! preceded it. Raw history is compacted into turns by
//! [`extract_turns`], which strips channel metadata and skips slash commands.
//!
//! ## Verdicts
//!
//! The guardian model answers with a single `ALLOW: ...` / `BLOCK: ...` line.
//! [`parse_verdict`] turns that into a [`GuardianDecision`], taking the first
//! verdict line and ignoring anything after it.

pub mod config;
pub mod conversation;
pub mod core;
pub mod decision;
pub mod prompt;
pub mod tool;
pub mod util;
pub mod verdict;

// Re-export commonly used types
pub use config::{
    ConfigIssue, ConfigIssueCode, FallbackPolicy, GuardianMode, OutputFormat, Severity,
};
pub use conversation::{
    ContentBlock, ConversationTurn, HistoryMessage, MessageContent, TurnExtraction,
    extract_turns, extract_with_trailing, sanitize_user_prompt, strip_channel_metadata,
};
pub use core::{
    error::DomainError,
    model::{Model, ProviderFamily},
};
pub use decision::{DecisionAction, GuardianDecision};
pub use prompt::GuardianPromptTemplate;
pub use tool::{ToolCallRequest, WatchedTools};
pub use verdict::{DEFAULT_BLOCK_REASON, parse_verdict};
