//! Model value object identifying the policy-evaluation model

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Provider family a guardian model is served by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderFamily {
    Anthropic,
    OpenAi,
}

impl ProviderFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderFamily::Anthropic => "anthropic",
            ProviderFamily::OpenAi => "openai",
        }
    }
}

impl std::str::FromStr for ProviderFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "anthropic" | "claude" => Ok(ProviderFamily::Anthropic),
            "openai" | "open-ai" | "oai" => Ok(ProviderFamily::OpenAi),
            other => Err(format!("unknown provider: {}", other)),
        }
    }
}

impl std::fmt::Display for ProviderFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A guardian model reference (Value Object)
///
/// Written either as `provider/name` (e.g. `anthropic/claude-haiku-4-5`) or as a
/// bare model name, in which case the provider is inferred from the family.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Model {
    provider: Option<String>,
    name: String,
}

impl Model {
    pub const DEFAULT: &'static str = "anthropic/claude-haiku-4-5";

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            provider: None,
            name: name.into(),
        }
    }

    pub fn with_provider(provider: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            provider: Some(provider.into()),
            name: name.into(),
        }
    }

    /// Model name as sent to the provider API
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Explicit provider prefix, if one was given
    pub fn provider(&self) -> Option<&str> {
        self.provider.as_deref()
    }

    pub fn is_claude(&self) -> bool {
        self.name.to_lowercase().starts_with("claude")
    }

    pub fn is_gpt(&self) -> bool {
        let lower = self.name.to_lowercase();
        lower.starts_with("gpt")
            || (lower.starts_with('o') && lower[1..].starts_with(|c: char| c.is_ascii_digit()))
    }

    /// Provider family from the explicit prefix, or inferred from the model name.
    pub fn family(&self) -> Option<ProviderFamily> {
        if let Some(provider) = &self.provider {
            return provider.parse().ok();
        }
        if self.is_claude() {
            Some(ProviderFamily::Anthropic)
        } else if self.is_gpt() {
            Some(ProviderFamily::OpenAi)
        } else {
            None
        }
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::DEFAULT.parse().unwrap_or_else(|_| Model::new(Self::DEFAULT))
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.provider {
            Some(provider) => write!(f, "{}/{}", provider, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

impl std::str::FromStr for Model {
    type Err = crate::core::error::DomainError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(crate::core::error::DomainError::InvalidModel(
                "model name is empty".to_string(),
            ));
        }
        match s.split_once('/') {
            Some((provider, name)) if !provider.is_empty() && !name.is_empty() => {
                Ok(Model::with_provider(provider, name))
            }
            Some(_) => Err(crate::core::error::DomainError::InvalidModel(s.to_string())),
            None => Ok(Model::new(s)),
        }
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_with_provider_prefix() {
        let model: Model = "anthropic/claude-haiku-4-5".parse().unwrap();
        assert_eq!(model.provider(), Some("anthropic"));
        assert_eq!(model.name(), "claude-haiku-4-5");
        assert_eq!(model.to_string(), "anthropic/claude-haiku-4-5");
    }

    #[test]
    fn test_bare_model_infers_family() {
        let model: Model = "gpt-4.1-mini".parse().unwrap();
        assert_eq!(model.provider(), None);
        assert_eq!(model.family(), Some(ProviderFamily::OpenAi));

        let model: Model = "claude-sonnet-4-5".parse().unwrap();
        assert_eq!(model.family(), Some(ProviderFamily::Anthropic));

        let model: Model = "o4-mini".parse().unwrap();
        assert!(model.is_gpt());

        let model: Model = "llama-3.1-8b".parse().unwrap();
        assert_eq!(model.family(), None);
    }

    #[test]
    fn test_explicit_provider_wins_over_name() {
        let model: Model = "openai/claude-proxy".parse().unwrap();
        assert_eq!(model.family(), Some(ProviderFamily::OpenAi));
    }

    #[test]
    fn test_invalid_models() {
        assert!("".parse::<Model>().is_err());
        assert!("anthropic/".parse::<Model>().is_err());
        assert!("/claude".parse::<Model>().is_err());
    }

    #[test]
    fn test_model_default() {
        let model = Model::default();
        assert_eq!(model.to_string(), Model::DEFAULT);
    }
}
