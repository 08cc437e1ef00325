//! Stdio hook transport.
//!
//! The hosting runtime streams agent inputs and candidate tool calls to the
//! guardian as JSON lines and reads verdicts back.

mod protocol;
mod server;

pub use protocol::{HookEvent, HookProtocolError, HookResponse, ToolCallEvent, parse_event};
pub use server::{HookServer, ServeSummary};
