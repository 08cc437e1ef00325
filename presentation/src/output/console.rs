//! Console output formatter

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use guardian_application::{GuardianConfig, ReviewOutcome};
use guardian_domain::{ConfigIssue, ConversationTurn, Severity};

/// Formats results for terminal display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    pub fn format_review(tool_name: &str, outcome: &ReviewOutcome) -> String {
        let mut output = String::new();

        let verdict = match &outcome.decision {
            _ if outcome.is_blocked() => "BLOCK".red().bold(),
            Some(decision) if decision.is_block() => "BLOCK (audit, not enforced)".yellow().bold(),
            _ => "ALLOW".green().bold(),
        };
        output.push_str(&format!(
            "{} {} {}\n",
            verdict,
            tool_name.bold(),
            format!("[{}]", outcome.state).dimmed()
        ));

        let reason = match &outcome.decision {
            Some(decision) => decision.reason_or("(no reason given)").to_string(),
            None => "tool is not watched".to_string(),
        };
        output.push_str(&format!("  {} {}\n", "Reason:".cyan(), reason));

        output
    }

    pub fn format_turns(turns: &[ConversationTurn]) -> String {
        if turns.is_empty() {
            return format!("{}\n", "(no turns)".dimmed());
        }

        let mut output = String::new();
        for (i, turn) in turns.iter().enumerate() {
            output.push_str(&Self::section_header(&format!("Turn {}", i + 1)));
            if let Some(assistant) = &turn.assistant {
                output.push_str(&format!("{}\n", "Assistant:".yellow().bold()));
                output.push_str(&Self::indent(assistant, "  "));
                output.push('\n');
            }
            output.push_str(&format!("{}\n", "User:".cyan().bold()));
            output.push_str(&Self::indent(&turn.user, "  "));
            output.push('\n');
        }
        output
    }

    pub fn format_config(config: &GuardianConfig) -> String {
        let mut output = String::new();
        output.push_str(&Self::section_header("Guardian"));

        let rows = [
            ("model", config.model.to_string()),
            ("mode", config.mode.as_str().to_string()),
            ("fallback_on_error", config.fallback_on_error.as_str().to_string()),
            ("timeout_ms", config.timeout.as_millis().to_string()),
            ("log_decisions", config.log_decisions.to_string()),
            ("max_recent_turns", config.max_recent_turns.to_string()),
            ("max_arg_length", config.max_arg_length.to_string()),
            ("watched_tools", config.watched_tools.sorted().join(", ")),
        ];
        for (key, value) in rows {
            output.push_str(&format!("  {:<18} {}\n", key.dimmed(), value));
        }
        output
    }

    /// One line per issue, warnings in yellow.
    pub fn format_issues(issues: &[ConfigIssue]) -> String {
        issues
            .iter()
            .map(|issue| {
                let label = match issue.severity {
                    Severity::Error => "error:".red().bold(),
                    Severity::Warning => "warning:".yellow().bold(),
                };
                format!("{} {}\n", label, issue.message)
            })
            .collect()
    }

    /// A config layer line for the `config` command.
    pub fn source_line(kind: &str, location: &str, found: bool) -> String {
        let marker = if found { "*".green() } else { "-".dimmed() };
        format!("  {} {:<9} {}", marker, kind, location)
    }

    pub fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_review(&self, tool_name: &str, outcome: &ReviewOutcome) -> String {
        Self::format_review(tool_name, outcome)
    }

    fn format_turns(&self, turns: &[ConversationTurn]) -> String {
        Self::format_turns(turns)
    }

    fn format_config(&self, config: &GuardianConfig) -> String {
        Self::format_config(config)
    }
}
