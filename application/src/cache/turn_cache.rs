//! Session-keyed cache of recent conversation turns.
//!
//! Written once per agent input cycle with the full history, read once per
//! reviewed tool call. Each write replaces the session's entry wholesale.

use super::expiring_map::ExpiringMap;
use crate::ports::clock::Clock;
use guardian_domain::{ConversationTurn, extract_with_trailing, sanitize_user_prompt};
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Turns stored for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedMessages {
    pub turns: Vec<ConversationTurn>,
    pub updated_at: Instant,
}

pub struct TurnCache {
    entries: ExpiringMap<String, Vec<ConversationTurn>>,
    clock: Arc<dyn Clock>,
}

impl TurnCache {
    pub const DEFAULT_TTL: Duration = Duration::from_secs(30 * 60);
    pub const DEFAULT_CAPACITY: usize = 100;

    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_limits(clock, Self::DEFAULT_TTL, Self::DEFAULT_CAPACITY)
    }

    pub fn with_limits(clock: Arc<dyn Clock>, ttl: Duration, capacity: usize) -> Self {
        Self {
            entries: ExpiringMap::new(ttl, capacity),
            clock,
        }
    }

    /// Rebuild the session's turns from `history` plus the in-flight prompt.
    ///
    /// Assistant text after the last user message is folded into the last
    /// turn. Only the newest `max_turns` turns are kept.
    pub fn update(
        &mut self,
        session_key: &str,
        history: &[Value],
        current_prompt: Option<&str>,
        max_turns: usize,
    ) {
        let mut turns = extract_with_trailing(history).attach_trailing();

        if let Some(prompt) = current_prompt.and_then(sanitize_user_prompt) {
            turns.push(ConversationTurn::user(prompt));
        }

        if turns.len() > max_turns {
            turns.drain(..turns.len() - max_turns);
        }

        let now = self.clock.now();
        self.entries.insert(session_key.to_string(), turns, now);
    }

    /// Live turns for the session, or an empty list.
    pub fn get(&mut self, session_key: &str) -> Vec<ConversationTurn> {
        self.entry(session_key)
            .map(|cached| cached.turns)
            .unwrap_or_default()
    }

    /// Live entry with its update time.
    pub fn entry(&mut self, session_key: &str) -> Option<CachedMessages> {
        let now = self.clock.now();
        self.entries
            .get_live(&session_key.to_string(), now)
            .map(|stored| CachedMessages {
                turns: stored.value.clone(),
                updated_at: stored.stored_at,
            })
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of entries, without a TTL check.
    pub fn size(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::clock::ManualClock;
    use serde_json::json;

    fn user(text: &str) -> Value {
        json!({"role": "user", "content": text})
    }

    fn assistant(text: &str) -> Value {
        json!({"role": "assistant", "content": text})
    }

    fn cache() -> (TurnCache, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        (TurnCache::new(clock.clone()), clock)
    }

    // ==================== update / get ====================

    #[test]
    fn test_update_appends_current_prompt_last() {
        let (mut cache, _) = cache();
        let history = vec![user("one"), assistant("a"), user("two"), user("three")];
        cache.update("s1", &history, Some("Latest prompt"), 3);

        let turns = cache.get("s1");
        assert_eq!(turns.len(), 3);
        assert_eq!(turns[0], ConversationTurn::user("two").with_assistant("a"));
        assert_eq!(turns[2], ConversationTurn::user("Latest prompt"));
    }

    #[test]
    fn test_update_keeps_last_max_turns() {
        let (mut cache, _) = cache();
        let history: Vec<Value> = (1..=6).map(|i| user(&format!("m{i}"))).collect();
        cache.update("s1", &history, None, 4);

        let users: Vec<String> = cache.get("s1").into_iter().map(|t| t.user).collect();
        assert_eq!(users, vec!["m3", "m4", "m5", "m6"]);
    }

    #[test]
    fn test_invalid_current_prompt_is_ignored() {
        let (mut cache, _) = cache();
        let history = vec![user("hello")];
        for prompt in ["   ", "/new", "Sender (untrusted metadata):\n```\n{}\n```"] {
            cache.update("s1", &history, Some(prompt), 5);
            assert_eq!(cache.get("s1"), vec![ConversationTurn::user("hello")]);
        }
    }

    #[test]
    fn test_trailing_assistant_attached_to_last_turn() {
        let (mut cache, _) = cache();
        let history = vec![user("post the summary"), assistant("Here is the summary.")];
        cache.update("s1", &history, None, 5);
        assert_eq!(
            cache.get("s1"),
            vec![ConversationTurn::user("post the summary").with_assistant("Here is the summary.")]
        );
    }

    #[test]
    fn test_trailing_assistant_precedes_current_prompt_turn() {
        let (mut cache, _) = cache();
        let history = vec![user("draft an email"), assistant("Draft: Hi Bob")];
        cache.update("s1", &history, Some("send it"), 5);
        let turns = cache.get("s1");
        assert_eq!(turns[0].assistant.as_deref(), Some("Draft: Hi Bob"));
        assert_eq!(turns[1], ConversationTurn::user("send it"));
    }

    #[test]
    fn test_update_is_idempotent() {
        let (mut cache, _) = cache();
        let history = vec![user("a"), assistant("b"), user("c")];
        cache.update("s1", &history, Some("d"), 3);
        let first = cache.get("s1");
        cache.update("s1", &history, Some("d"), 3);
        assert_eq!(cache.get("s1"), first);
        assert_eq!(cache.size(), 1);
    }

    #[test]
    fn test_update_replaces_wholesale() {
        let (mut cache, _) = cache();
        cache.update("s1", &[user("old")], None, 3);
        cache.update("s1", &[user("new")], None, 3);
        assert_eq!(cache.get("s1"), vec![ConversationTurn::user("new")]);
    }

    #[test]
    fn test_unknown_session_is_empty() {
        let (mut cache, _) = cache();
        assert!(cache.get("missing").is_empty());
    }

    // ==================== TTL ====================

    #[test]
    fn test_expired_entry_is_removed_on_get() {
        let (mut cache, clock) = cache();
        cache.update("s1", &[user("hello")], None, 3);

        clock.advance(TurnCache::DEFAULT_TTL);
        assert_eq!(cache.get("s1").len(), 1);

        clock.advance(Duration::from_secs(1));
        assert!(cache.get("s1").is_empty());
        assert_eq!(cache.size(), 0);
    }

    #[test]
    fn test_size_counts_expired_entries() {
        let (mut cache, clock) = cache();
        cache.update("s1", &[user("hello")], None, 3);
        clock.advance(TurnCache::DEFAULT_TTL * 2);
        assert_eq!(cache.size(), 1);
    }

    #[test]
    fn test_update_sweeps_expired_sessions() {
        let (mut cache, clock) = cache();
        cache.update("stale", &[user("hello")], None, 3);
        clock.advance(TurnCache::DEFAULT_TTL + Duration::from_secs(1));
        cache.update("fresh", &[user("hi")], None, 3);
        assert_eq!(cache.size(), 1);
    }

    // ==================== Capacity ====================

    #[test]
    fn test_capacity_evicts_oldest_sessions() {
        let (mut cache, _) = cache();
        for i in 0..=TurnCache::DEFAULT_CAPACITY {
            cache.update(&format!("s{i}"), &[user("hi")], None, 3);
        }
        assert_eq!(cache.size(), TurnCache::DEFAULT_CAPACITY);
        assert!(cache.get("s0").is_empty());
        assert_eq!(cache.get("s1").len(), 1);
    }

    #[test]
    fn test_entry_reports_update_time() {
        let (mut cache, clock) = cache();
        cache.update("s1", &[user("hi")], None, 3);
        let updated_at = clock.now();
        clock.advance(Duration::from_secs(5));
        assert_eq!(cache.entry("s1").map(|e| e.updated_at), Some(updated_at));
    }

    #[test]
    fn test_clear_discards_everything() {
        let (mut cache, _) = cache();
        cache.update("s1", &[user("a")], None, 3);
        cache.update("s2", &[user("b")], None, 3);
        cache.clear();
        assert_eq!(cache.size(), 0);
        assert!(cache.get("s1").is_empty());
    }
}
