//! Leniently typed config values.
//!
//! A value of the wrong type must not make the whole file fail to load.
//! [`Lenient`] captures it verbatim instead, so the parse step can report
//! the problem and substitute the default.

use guardian_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Lenient<T> {
    Valid(T),
    Invalid(serde_json::Value),
}

/// Resolve an optional lenient value, reporting a wrong type.
pub(super) fn resolve<T: Clone>(
    value: &Option<Lenient<T>>,
    field: &str,
    expected: &'static str,
    default: T,
) -> (T, Vec<ConfigIssue>) {
    match value {
        None => (default, vec![]),
        Some(Lenient::Valid(v)) => (v.clone(), vec![]),
        Some(Lenient::Invalid(raw)) => {
            let issue = ConfigIssue::warning(
                ConfigIssueCode::InvalidType {
                    field: field.to_string(),
                    expected,
                },
                format!(
                    "{}: expected {}, got {}, using default",
                    field, expected, raw
                ),
            );
            (default, vec![issue])
        }
    }
}

/// Reject zero for a count that must be positive.
pub(super) fn positive(
    (value, mut issues): (usize, Vec<ConfigIssue>),
    field: &str,
    default: usize,
) -> (usize, Vec<ConfigIssue>) {
    if value > 0 {
        return (value, issues);
    }
    issues.push(ConfigIssue::warning(
        ConfigIssueCode::OutOfRange {
            field: field.to_string(),
        },
        format!("{}: must be at least 1, using {}", field, default),
    ));
    (default, issues)
}
