//! Configuration file loading for intent-guardian
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. `INTENT_GUARDIAN_*` environment variables
//! 3. Project root: `./guardian.toml` or `./.guardian.toml`
//! 4. Global: `$XDG_CONFIG_HOME/intent-guardian/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileAnthropicConfig, FileConfig, FileGuardianConfig, FileLoggingConfig, FileOpenAiConfig,
    FileProvidersConfig, Lenient,
};
pub use loader::{ConfigLoader, ConfigSource, ConfigSourceKind};
