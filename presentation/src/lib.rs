//! Presentation layer for intent-guardian
//!
//! This crate contains the CLI definition and the console/JSON
//! formatters for review outcomes, extracted turns and configuration.

pub mod cli;
pub mod output;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, FallbackArg, ModeArg, OutputArg};
pub use output::{ConsoleFormatter, JsonFormatter, OutputFormatter, formatter_for};
