//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly; resolving them into application types
//! reports every tolerated problem as a [`ConfigIssue`].

mod guardian;
mod lenient;
mod logging;
mod providers;

pub use guardian::FileGuardianConfig;
pub use lenient::Lenient;
pub use logging::FileLoggingConfig;
pub use providers::{FileAnthropicConfig, FileOpenAiConfig, FileProvidersConfig};

use guardian_domain::ConfigIssue;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Review behavior
    pub guardian: FileGuardianConfig,
    /// Model provider credentials and routing
    pub providers: FileProvidersConfig,
    /// Decision audit log
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// This is the single entry point for config validation. It checks:
    /// 1. Types, enum values and ranges of every `[guardian]` field
    /// 2. Provider names in `[providers]`
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.guardian.to_guardian_config().1;
        issues.extend(self.providers.parse_default().1);
        issues.extend(self.providers.parse_routing().1);
        issues
    }
}
