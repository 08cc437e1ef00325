//! Configuration issues.
//!
//! Invalid configuration values never abort startup: each one is replaced by
//! a safe default and reported as a [`ConfigIssue`] so the caller can surface
//! it as a warning.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: a default was substituted.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// The value has the wrong type (e.g. a string where a number belongs).
    InvalidType {
        field: String,
        expected: &'static str,
    },
    /// The value is not one of the recognized enum strings.
    InvalidEnumValue {
        field: String,
        value: String,
        valid_values: Vec<String>,
    },
    /// The value is well-typed but outside the accepted range.
    OutOfRange { field: String },
    /// The model reference cannot be parsed.
    InvalidModel { value: String },
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }
}
