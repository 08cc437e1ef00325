//! Application-level configuration.
//!
//! - [`GuardianConfig`]: review behavior (watched tools, timeout, mode, limits)

pub mod guardian_config;

pub use guardian_config::GuardianConfig;
