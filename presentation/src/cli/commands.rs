//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use guardian_domain::{FallbackPolicy, GuardianMode, OutputFormat};
use std::path::PathBuf;

/// Output format for one-shot commands
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputArg {
    /// Human-readable summary
    Text,
    /// Single JSON object
    Json,
}

impl From<OutputArg> for OutputFormat {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::Text => OutputFormat::Text,
            OutputArg::Json => OutputFormat::Json,
        }
    }
}

/// Enforcement mode override
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModeArg {
    /// Block verdicts stop the tool call
    Enforce,
    /// Block verdicts are only logged
    Audit,
}

impl From<ModeArg> for GuardianMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Enforce => GuardianMode::Enforce,
            ModeArg::Audit => GuardianMode::Audit,
        }
    }
}

/// Verdict used when the guardian model cannot answer
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FallbackArg {
    Allow,
    Block,
}

impl From<FallbackArg> for FallbackPolicy {
    fn from(arg: FallbackArg) -> Self {
        match arg {
            FallbackArg::Allow => FallbackPolicy::Allow,
            FallbackArg::Block => FallbackPolicy::Block,
        }
    }
}

/// CLI arguments for intent-guardian
#[derive(Parser, Debug)]
#[command(name = "intent-guardian")]
#[command(author, version, about = "Intent-alignment guard for autonomous agent tool calls")]
#[command(long_about = r#"
Intent Guardian reviews risky tool calls made by an autonomous agent and
blocks the ones the user never asked for.

Before each watched tool runs, a small guardian model sees the user's last
few messages (only what the user said, never tool output) and answers
ALLOW or BLOCK.

Configuration files are loaded from (in priority order):
1. --config <path>                                Explicit config file
2. INTENT_GUARDIAN_* environment variables        (e.g. INTENT_GUARDIAN_GUARDIAN__MODE=audit)
3. ./guardian.toml or ./.guardian.toml           Project-level config
4. ~/.config/intent-guardian/config.toml          Global config

Example:
  intent-guardian serve
  intent-guardian check --tool exec --args '{"command":"rm -rf /"}' --history chat.json
  intent-guardian --mode audit serve
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Append decision audit events to this JSONL file
    #[arg(long, global = true, value_name = "PATH")]
    pub decision_log: Option<PathBuf>,

    /// Override the enforcement mode
    #[arg(long, global = true, value_enum)]
    pub mode: Option<ModeArg>,

    /// Override the verdict used when the guardian model fails
    #[arg(long, global = true, value_enum)]
    pub fallback: Option<FallbackArg>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the stdio hook server (JSON lines on stdin, verdicts on stdout)
    Serve,

    /// Review a single tool call and exit (exit code 2 when blocked)
    Check {
        /// Tool name
        #[arg(long, value_name = "NAME")]
        tool: String,

        /// Tool arguments as a JSON value
        #[arg(long, value_name = "JSON")]
        args: Option<String>,

        /// Conversation history file (JSON array of messages)
        #[arg(long, value_name = "FILE")]
        history: Option<PathBuf>,

        /// The user's current prompt
        #[arg(long, value_name = "TEXT")]
        prompt: Option<String>,

        /// Session key
        #[arg(long, value_name = "KEY")]
        session: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        output: OutputArg,
    },

    /// Print the turns extracted from a history file
    Turns {
        /// Conversation history file (JSON array of messages)
        #[arg(long, value_name = "FILE")]
        history: PathBuf,

        /// The user's current prompt
        #[arg(long, value_name = "TEXT")]
        prompt: Option<String>,

        /// Keep at most this many turns
        #[arg(long, value_name = "N")]
        max_turns: Option<usize>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        output: OutputArg,
    },

    /// Show configuration sources, resolved settings and issues
    Config {
        /// Output format (json prints only the resolved settings)
        #[arg(short, long, value_enum, default_value = "text")]
        output: OutputArg,
    },
}
