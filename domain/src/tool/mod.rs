//! Tool domain
//!
//! The intercepted tool call and the watched-tool set.

pub mod entities;

pub use entities::{ToolCallRequest, WatchedTools};
