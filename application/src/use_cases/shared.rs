//! Shared utilities for use cases.
//!
//! Session key resolution used by both the turn recorder and the reviewer,
//! so an agent input and a tool call without a key land on the same entry.

/// Cache key used when the runtime supplies no usable session key.
pub const UNRESOLVED_SESSION_KEY: &str = "unknown";

/// A session key after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SessionKey {
    pub key: String,
    pub resolved: bool,
}

/// Map a missing or blank key to [`UNRESOLVED_SESSION_KEY`].
pub(crate) fn resolve_session_key(session_key: Option<&str>) -> SessionKey {
    match session_key.map(str::trim) {
        Some(key) if !key.is_empty() => SessionKey {
            key: key.to_string(),
            resolved: true,
        },
        _ => SessionKey {
            key: UNRESOLVED_SESSION_KEY.to_string(),
            resolved: false,
        },
    }
}
