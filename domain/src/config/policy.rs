//! Enforcement mode and failure policy value objects

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Whether block verdicts actually stop the tool call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuardianMode {
    /// Block verdicts block the call (default)
    #[default]
    Enforce,
    /// Block verdicts are only logged; every call proceeds
    Audit,
}

impl GuardianMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GuardianMode::Enforce => "enforce",
            GuardianMode::Audit => "audit",
        }
    }

    pub fn is_enforcing(&self) -> bool {
        matches!(self, GuardianMode::Enforce)
    }
}

impl std::str::FromStr for GuardianMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "enforce" => Ok(GuardianMode::Enforce),
            "audit" => Ok(GuardianMode::Audit),
            _ => Err(DomainError::InvalidEnumValue {
                field: "mode",
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for GuardianMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What to decide when the model cannot be consulted or understood.
///
/// `Allow` is fail-open (usability), `Block` is fail-closed (security).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackPolicy {
    #[default]
    Allow,
    Block,
}

impl FallbackPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            FallbackPolicy::Allow => "allow",
            FallbackPolicy::Block => "block",
        }
    }
}

impl std::str::FromStr for FallbackPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "allow" => Ok(FallbackPolicy::Allow),
            "block" => Ok(FallbackPolicy::Block),
            _ => Err(DomainError::InvalidEnumValue {
                field: "fallback_on_error",
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for FallbackPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parse() {
        assert_eq!("enforce".parse::<GuardianMode>().unwrap(), GuardianMode::Enforce);
        assert_eq!("AUDIT".parse::<GuardianMode>().unwrap(), GuardianMode::Audit);
        assert!("observe".parse::<GuardianMode>().is_err());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(GuardianMode::default(), GuardianMode::Enforce);
        assert_eq!(FallbackPolicy::default(), FallbackPolicy::Allow);
    }

    #[test]
    fn test_fallback_parse() {
        assert_eq!(" block ".parse::<FallbackPolicy>().unwrap(), FallbackPolicy::Block);
        assert!("deny".parse::<FallbackPolicy>().is_err());
    }
}
