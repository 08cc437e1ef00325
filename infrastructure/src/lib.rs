//! Infrastructure layer for intent-guardian
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: configuration loading, model provider
//! adapters, the decision audit log, and the stdio hook transport.

pub mod config;
pub mod hook;
pub mod logging;
pub mod providers;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigSource, ConfigSourceKind, FileAnthropicConfig, FileConfig,
    FileGuardianConfig, FileLoggingConfig, FileOpenAiConfig, FileProvidersConfig,
};
pub use hook::{HookProtocolError, HookServer, ServeSummary};
pub use logging::JsonlDecisionLogger;
pub use providers::{AnthropicAdapter, OpenAiAdapter, ProviderAdapter, RoutingGateway};
