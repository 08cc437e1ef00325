//! Guardian configuration from TOML (`[guardian]` section)

use super::lenient::{Lenient, positive, resolve};
use guardian_application::GuardianConfig;
use guardian_domain::{
    ConfigIssue, ConfigIssueCode, FallbackPolicy, GuardianMode, Model, WatchedTools,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw guardian configuration from TOML
///
/// # Example
///
/// ```toml
/// [guardian]
/// model = "anthropic/claude-haiku-4-5"
/// watched_tools = ["message", "exec", "write"]
/// timeout_ms = 20000
/// fallback_on_error = "allow"              # "allow" or "block"
/// log_decisions = true
/// mode = "enforce"                         # "enforce" or "audit"
/// max_recent_turns = 3
/// max_arg_length = 500
/// ```
///
/// Every field is optional and leniently typed: a missing or malformed
/// value resolves to the default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGuardianConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<Lenient<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watched_tools: Option<Lenient<Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<Lenient<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_on_error: Option<Lenient<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_decisions: Option<Lenient<bool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<Lenient<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_recent_turns: Option<Lenient<usize>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_arg_length: Option<Lenient<usize>>,
}

impl FileGuardianConfig {
    pub fn parse_model(&self) -> (Model, Vec<ConfigIssue>) {
        let (raw, mut issues) = resolve(
            &self.model,
            "guardian.model",
            "string",
            Model::DEFAULT.to_string(),
        );
        match raw.parse::<Model>() {
            Ok(model) => (model, issues),
            Err(_) => {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::InvalidModel { value: raw.clone() },
                    format!(
                        "guardian.model: invalid model '{}', falling back to '{}'",
                        raw,
                        Model::DEFAULT
                    ),
                ));
                (Model::default(), issues)
            }
        }
    }

    pub fn parse_watched_tools(&self) -> (WatchedTools, Vec<ConfigIssue>) {
        let default = WatchedTools::DEFAULT.iter().map(|s| s.to_string()).collect();
        let (names, issues) = resolve(
            &self.watched_tools,
            "guardian.watched_tools",
            "array of strings",
            default,
        );
        (WatchedTools::new(names), issues)
    }

    pub fn parse_timeout(&self) -> (Duration, Vec<ConfigIssue>) {
        let (ms, mut issues) = resolve(
            &self.timeout_ms,
            "guardian.timeout_ms",
            "non-negative integer",
            GuardianConfig::DEFAULT_TIMEOUT_MS,
        );
        if ms == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::OutOfRange {
                    field: "guardian.timeout_ms".to_string(),
                },
                format!(
                    "guardian.timeout_ms: must be at least 1, using {}",
                    GuardianConfig::DEFAULT_TIMEOUT_MS
                ),
            ));
            return (
                Duration::from_millis(GuardianConfig::DEFAULT_TIMEOUT_MS),
                issues,
            );
        }
        (Duration::from_millis(ms), issues)
    }

    /// Unknown values normalize to `allow`.
    pub fn parse_fallback(&self) -> (FallbackPolicy, Vec<ConfigIssue>) {
        let (raw, mut issues) = resolve(
            &self.fallback_on_error,
            "guardian.fallback_on_error",
            "string",
            FallbackPolicy::default().as_str().to_string(),
        );
        match raw.parse::<FallbackPolicy>() {
            Ok(policy) => (policy, issues),
            Err(_) => {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "guardian.fallback_on_error".to_string(),
                        value: raw.clone(),
                        valid_values: vec!["allow".to_string(), "block".to_string()],
                    },
                    format!(
                        "guardian.fallback_on_error: unknown value '{}', falling back to 'allow'",
                        raw
                    ),
                ));
                (FallbackPolicy::Allow, issues)
            }
        }
    }

    pub fn parse_log_decisions(&self) -> (bool, Vec<ConfigIssue>) {
        resolve(&self.log_decisions, "guardian.log_decisions", "boolean", true)
    }

    /// Unknown values normalize to `enforce`.
    pub fn parse_mode(&self) -> (GuardianMode, Vec<ConfigIssue>) {
        let (raw, mut issues) = resolve(
            &self.mode,
            "guardian.mode",
            "string",
            GuardianMode::default().as_str().to_string(),
        );
        match raw.parse::<GuardianMode>() {
            Ok(mode) => (mode, issues),
            Err(_) => {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "guardian.mode".to_string(),
                        value: raw.clone(),
                        valid_values: vec!["enforce".to_string(), "audit".to_string()],
                    },
                    format!(
                        "guardian.mode: unknown value '{}', falling back to 'enforce'",
                        raw
                    ),
                ));
                (GuardianMode::Enforce, issues)
            }
        }
    }

    pub fn parse_max_recent_turns(&self) -> (usize, Vec<ConfigIssue>) {
        let default = GuardianConfig::DEFAULT_MAX_RECENT_TURNS;
        positive(
            resolve(
                &self.max_recent_turns,
                "guardian.max_recent_turns",
                "positive integer",
                default,
            ),
            "guardian.max_recent_turns",
            default,
        )
    }

    pub fn parse_max_arg_length(&self) -> (usize, Vec<ConfigIssue>) {
        let default = GuardianConfig::DEFAULT_MAX_ARG_LENGTH;
        positive(
            resolve(
                &self.max_arg_length,
                "guardian.max_arg_length",
                "positive integer",
                default,
            ),
            "guardian.max_arg_length",
            default,
        )
    }

    /// Resolve every field, collecting all issues.
    pub fn to_guardian_config(&self) -> (GuardianConfig, Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        let config = GuardianConfig {
            model: take(&mut issues, self.parse_model()),
            watched_tools: take(&mut issues, self.parse_watched_tools()),
            timeout: take(&mut issues, self.parse_timeout()),
            fallback_on_error: take(&mut issues, self.parse_fallback()),
            log_decisions: take(&mut issues, self.parse_log_decisions()),
            mode: take(&mut issues, self.parse_mode()),
            max_recent_turns: take(&mut issues, self.parse_max_recent_turns()),
            max_arg_length: take(&mut issues, self.parse_max_arg_length()),
        };
        (config, issues)
    }
}

fn take<T>(issues: &mut Vec<ConfigIssue>, (value, found): (T, Vec<ConfigIssue>)) -> T {
    issues.extend(found);
    value
}
