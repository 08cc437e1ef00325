//! Provider configuration from TOML (`[providers]` section)

use guardian_domain::{ConfigIssue, ConfigIssueCode, ProviderFamily};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Guardian verdicts are a single short line.
const DEFAULT_MAX_TOKENS: u32 = 256;

/// Anthropic API provider configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAnthropicConfig {
    /// Environment variable name for the API key (default: "ANTHROPIC_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended; use env var instead).
    pub api_key: Option<String>,
    /// Base URL for the Anthropic API.
    pub base_url: String,
    /// Max tokens per response.
    pub max_tokens: u32,
    /// Anthropic API version header.
    pub api_version: String,
}

impl Default for FileAnthropicConfig {
    fn default() -> Self {
        Self {
            api_key_env: "ANTHROPIC_API_KEY".to_string(),
            api_key: None,
            base_url: "https://api.anthropic.com".to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            api_version: "2023-06-01".to_string(),
        }
    }
}

/// OpenAI-compatible API provider configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOpenAiConfig {
    /// Environment variable name for the API key (default: "OPENAI_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended; use env var instead).
    pub api_key: Option<String>,
    /// Base URL (can point at any Chat Completions compatible server).
    pub base_url: String,
    /// Max tokens per response.
    pub max_tokens: u32,
}

impl Default for FileOpenAiConfig {
    fn default() -> Self {
        Self {
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
            base_url: "https://api.openai.com".to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    /// Default provider: "anthropic" or "openai".
    pub default: Option<String>,
    /// Anthropic API settings.
    pub anthropic: FileAnthropicConfig,
    /// OpenAI API settings.
    pub openai: FileOpenAiConfig,
    /// Explicit model → provider routing overrides.
    pub routing: HashMap<String, String>,
}

impl FileProvidersConfig {
    /// Default provider, `None` when unset or unknown.
    pub fn parse_default(&self) -> (Option<ProviderFamily>, Vec<ConfigIssue>) {
        match self.default.as_deref() {
            None => (None, vec![]),
            Some(name) => match name.parse::<ProviderFamily>() {
                Ok(family) => (Some(family), vec![]),
                Err(_) => (None, vec![unknown_provider("providers.default", name)]),
            },
        }
    }

    /// Routing table with unknown provider names dropped.
    pub fn parse_routing(&self) -> (HashMap<String, ProviderFamily>, Vec<ConfigIssue>) {
        let mut routing = HashMap::new();
        let mut issues = Vec::new();

        let mut entries: Vec<_> = self.routing.iter().collect();
        entries.sort();
        for (model, provider) in entries {
            match provider.parse::<ProviderFamily>() {
                Ok(family) => {
                    routing.insert(model.clone(), family);
                }
                Err(_) => issues.push(unknown_provider(
                    &format!("providers.routing.{}", model),
                    provider,
                )),
            }
        }
        (routing, issues)
    }
}

fn unknown_provider(field: &str, value: &str) -> ConfigIssue {
    ConfigIssue::warning(
        ConfigIssueCode::InvalidEnumValue {
            field: field.to_string(),
            value: value.to_string(),
            valid_values: vec!["anthropic".to_string(), "openai".to_string()],
        },
        format!("{}: unknown provider '{}', ignoring", field, value),
    )
}
