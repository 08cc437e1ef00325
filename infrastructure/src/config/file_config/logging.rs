//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw logging configuration from TOML
///
/// ```toml
/// [logging]
/// decision_log = "~/.local/state/intent-guardian/decisions.jsonl"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL decision audit log; disabled when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision_log: Option<PathBuf>,
}

impl FileLoggingConfig {
    /// Decision log path with a leading `~/` expanded.
    pub fn decision_log_path(&self) -> Option<PathBuf> {
        let path = self.decision_log.as_ref()?;
        match path.strip_prefix("~") {
            Ok(rest) => dirs::home_dir().map(|home| home.join(rest)),
            Err(_) => Some(path.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_path_is_kept() {
        let config = FileLoggingConfig {
            decision_log: Some(PathBuf::from("/var/log/guardian.jsonl")),
        };
        assert_eq!(
            config.decision_log_path(),
            Some(PathBuf::from("/var/log/guardian.jsonl"))
        );
    }

    #[test]
    fn test_unset_is_none() {
        assert_eq!(FileLoggingConfig::default().decision_log_path(), None);
    }
}
