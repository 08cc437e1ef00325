//! Output formatter trait

use super::{console::ConsoleFormatter, json::JsonFormatter};
use guardian_application::{GuardianConfig, ReviewOutcome};
use guardian_domain::{ConversationTurn, OutputFormat};

/// Trait for rendering one-shot command results
pub trait OutputFormatter {
    /// Format the outcome of reviewing `tool_name`
    fn format_review(&self, tool_name: &str, outcome: &ReviewOutcome) -> String;

    /// Format extracted conversation turns
    fn format_turns(&self, turns: &[ConversationTurn]) -> String;

    /// Format the resolved guardian settings
    fn format_config(&self, config: &GuardianConfig) -> String;
}

/// Pick the formatter for an output format.
pub fn formatter_for(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(ConsoleFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}
