//! CLI entrypoint for Intent Guardian
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use guardian_application::{
    AgentInput, DecisionLogger, GatewayGuardianModel, GuardianCaches, GuardianConfig,
    RecordTurnsUseCase, ReviewToolCallUseCase, UNRESOLVED_SESSION_KEY,
};
use guardian_domain::{ConfigIssue, ToolCallRequest};
use guardian_infrastructure::{
    AnthropicAdapter, ConfigLoader, FileConfig, HookServer, JsonlDecisionLogger, OpenAiAdapter,
    ProviderAdapter, RoutingGateway,
};
use guardian_presentation::{Cli, Command, ConsoleFormatter, OutputArg, formatter_for};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Exit code for `check` when the call would be blocked.
const EXIT_BLOCKED: u8 = 2;

/// Use cases sharing one set of caches.
struct Guardian {
    record_turns: Arc<RecordTurnsUseCase>,
    review: Arc<ReviewToolCallUseCase>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level; stdout carries protocol output
    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting Intent Guardian");

    // === Configuration ===
    let file_config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).map_err(|e| anyhow::anyhow!(e))?
    };

    let issues = file_config.validate();
    for issue in &issues {
        warn!("{}", issue.message);
    }

    let mut config = file_config.guardian.to_guardian_config().0;
    if let Some(mode) = cli.mode {
        config = config.with_mode(mode.into());
    }
    if let Some(fallback) = cli.fallback {
        config = config.with_fallback(fallback.into());
    }

    match &cli.command {
        Command::Config { output } => {
            print_config(&cli, &config, &issues, *output);
            Ok(ExitCode::SUCCESS)
        }
        Command::Turns {
            history,
            prompt,
            max_turns,
            output,
        } => {
            let max_turns = max_turns.unwrap_or(config.max_recent_turns);
            show_turns(history, prompt.as_deref(), max_turns, *output)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Serve => {
            let guardian = wire(&cli, &file_config, &config)?;
            let server = HookServer::new(guardian.record_turns, guardian.review);
            let stdin = BufReader::new(tokio::io::stdin());
            let stdout = tokio::io::stdout();

            info!("Serving hook protocol on stdio (mode: {})", config.mode);
            tokio::select! {
                result = server.serve(stdin, stdout) => {
                    result.context("hook server failed")?;
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("Interrupted, shutting down");
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Check {
            tool,
            args,
            history,
            prompt,
            session,
            output,
        } => {
            let guardian = wire(&cli, &file_config, &config)?;

            let args = match args {
                Some(raw) => serde_json::from_str(raw).context("--args is not valid JSON")?,
                None => Value::Null,
            };

            let mut input = AgentInput::new(match history {
                Some(path) => read_history(path)?,
                None => Vec::new(),
            });
            if let Some(prompt) = prompt {
                input = input.with_prompt(prompt.clone());
            }
            if let Some(session) = session {
                input = input.with_session(session.clone());
            }
            if !input.history.is_empty() || input.prompt.is_some() {
                guardian.record_turns.execute(&input);
            }

            let mut request = ToolCallRequest::new(tool.clone(), args);
            if let Some(session) = session {
                request = request.with_session(session.clone());
            }

            let outcome = guardian.review.execute(&request).await;
            println!(
                "{}",
                formatter_for((*output).into()).format_review(tool, &outcome)
            );

            Ok(if outcome.is_blocked() {
                ExitCode::from(EXIT_BLOCKED)
            } else {
                ExitCode::SUCCESS
            })
        }
    }
}

fn wire(cli: &Cli, file_config: &FileConfig, config: &GuardianConfig) -> Result<Guardian> {
    let caches = Arc::new(GuardianCaches::default());
    let gateway = Arc::new(build_gateway(file_config));
    let model = Arc::new(GatewayGuardianModel::new(gateway));

    let mut review = ReviewToolCallUseCase::new(config.clone(), caches.clone(), model);
    if let Some(logger) = decision_logger(cli, file_config, config)? {
        review = review.with_decision_logger(logger);
    }

    Ok(Guardian {
        record_turns: Arc::new(RecordTurnsUseCase::new(caches, config.max_recent_turns)),
        review: Arc::new(review),
    })
}

fn build_gateway(file_config: &FileConfig) -> RoutingGateway {
    let providers: Vec<Arc<dyn ProviderAdapter>> = vec![
        Arc::new(AnthropicAdapter::new(file_config.providers.anthropic.clone())),
        Arc::new(OpenAiAdapter::new(file_config.providers.openai.clone())),
    ];
    let routing = file_config.providers.parse_routing().0;
    let default_family = file_config.providers.parse_default().0;
    RoutingGateway::new(providers, &routing, default_family)
}

/// The audit log is opened only when decision logging is on and a path is set.
fn decision_logger(
    cli: &Cli,
    file_config: &FileConfig,
    config: &GuardianConfig,
) -> Result<Option<Arc<dyn DecisionLogger>>> {
    if !config.log_decisions {
        return Ok(None);
    }
    let path: Option<PathBuf> = cli
        .decision_log
        .clone()
        .or_else(|| file_config.logging.decision_log_path());
    let Some(path) = path else {
        return Ok(None);
    };

    let logger = JsonlDecisionLogger::open(&path)
        .with_context(|| format!("cannot open decision log {}", path.display()))?;
    info!("Writing decision audit log to {}", path.display());
    Ok(Some(Arc::new(logger)))
}

fn read_history(path: &Path) -> Result<Vec<Value>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read history file {}", path.display()))?;
    let value: Value = serde_json::from_str(&raw)
        .with_context(|| format!("history file {} is not valid JSON", path.display()))?;
    match value {
        Value::Array(messages) => Ok(messages),
        _ => bail!("history file {} must contain a JSON array", path.display()),
    }
}

/// Run the same compaction the hook applies and print what would be cached.
fn show_turns(
    history: &Path,
    prompt: Option<&str>,
    max_turns: usize,
    output: OutputArg,
) -> Result<()> {
    let mut input = AgentInput::new(read_history(history)?);
    if let Some(prompt) = prompt {
        input = input.with_prompt(prompt);
    }

    let caches = Arc::new(GuardianCaches::default());
    RecordTurnsUseCase::new(caches.clone(), max_turns).execute(&input);
    let turns = caches.turns().get(UNRESOLVED_SESSION_KEY);

    println!("{}", formatter_for(output.into()).format_turns(&turns));
    Ok(())
}

fn print_config(cli: &Cli, config: &GuardianConfig, issues: &[ConfigIssue], output: OutputArg) {
    if let OutputArg::Json = output {
        println!("{}", formatter_for(output.into()).format_config(config));
        return;
    }

    println!("Configuration sources (highest priority first):");
    if cli.no_config {
        println!("{}", ConsoleFormatter::source_line("Default", "--no-config", true));
    } else {
        for source in ConfigLoader::sources(cli.config.as_deref()) {
            println!(
                "{}",
                ConsoleFormatter::source_line(source.kind.as_str(), &source.location, source.found)
            );
        }
    }

    print!("{}", ConsoleFormatter::format_config(config));

    if !issues.is_empty() {
        println!();
        print!("{}", ConsoleFormatter::format_issues(issues));
    }
}
