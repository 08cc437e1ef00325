//! Channel metadata stripping.
//!
//! Messaging channels prepend structured context to user text, e.g.
//!
//! ````text
//! Conversation info (untrusted metadata):
//! ```json
//! {"chat_id": "123", "sender": "alice"}
//! ```
//!
//! Delete those files
//! ````
//!
//! Those blocks are authored by the channel (or whoever controls it), not by
//! the user, so they must never be read as user intent.

use regex::Regex;
use std::sync::LazyLock;

/// Labels that introduce an untrusted metadata block.
pub const METADATA_LABELS: &[&str] = &[
    "Conversation info (untrusted metadata):",
    "Sender (untrusted metadata):",
];

static METADATA_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    let labels = METADATA_LABELS
        .iter()
        .map(|label| regex::escape(label))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?s)(?:{labels})\s*```[\w-]*.*?```"))
        .expect("metadata block pattern is valid")
});

static EXCESS_NEWLINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("newline pattern is valid"));

/// Remove every untrusted metadata block from `text`.
///
/// Runs of three or more newlines left behind are collapsed to two and the
/// result is trimmed. A text made only of metadata strips to `""`.
pub fn strip_channel_metadata(text: &str) -> String {
    let stripped = METADATA_BLOCK.replace_all(text, "");
    let collapsed = EXCESS_NEWLINES.replace_all(&stripped, "\n\n");
    collapsed.trim().to_string()
}
