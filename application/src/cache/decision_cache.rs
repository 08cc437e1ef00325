//! Short-lived memo of guardian verdicts per (session, tool).
//!
//! An agent turn often calls the same tool several times in a row (or in
//! parallel). The first review's verdict is reused for the rest of the burst
//! so the model is consulted at most once per distinct tool per turn. The
//! TTL is much shorter than the turn cache's: a verdict is only
//! meaningful for the agent turn that produced it.

use super::expiring_map::ExpiringMap;
use crate::ports::clock::Clock;
use guardian_domain::GuardianDecision;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A cached verdict with the time it was stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedDecision {
    pub decision: GuardianDecision,
    pub cached_at: Instant,
}

type DecisionKey = (String, String);

pub struct DecisionCache {
    entries: ExpiringMap<DecisionKey, GuardianDecision>,
    clock: Arc<dyn Clock>,
}

impl DecisionCache {
    pub const DEFAULT_TTL: Duration = Duration::from_secs(5);
    pub const DEFAULT_CAPACITY: usize = 256;

    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_limits(clock, Self::DEFAULT_TTL, Self::DEFAULT_CAPACITY)
    }

    pub fn with_limits(clock: Arc<dyn Clock>, ttl: Duration, capacity: usize) -> Self {
        Self {
            entries: ExpiringMap::new(ttl, capacity),
            clock,
        }
    }

    fn key(session_key: &str, tool_name: &str) -> DecisionKey {
        (session_key.to_string(), tool_name.to_lowercase())
    }

    /// Live verdict for the pair; expired entries are dropped.
    pub fn get(&mut self, session_key: &str, tool_name: &str) -> Option<CachedDecision> {
        let now = self.clock.now();
        self.entries
            .get_live(&Self::key(session_key, tool_name), now)
            .map(|stored| CachedDecision {
                decision: stored.value.clone(),
                cached_at: stored.stored_at,
            })
    }

    pub fn insert(&mut self, session_key: &str, tool_name: &str, decision: GuardianDecision) {
        let now = self.clock.now();
        self.entries
            .insert(Self::key(session_key, tool_name), decision, now);
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

    fn cache() -> (DecisionCache, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        (DecisionCache::new(clock.clone()), clock)
    }

    #[test]
    fn test_hit_within_ttl() {
        let (mut cache, clock) = cache();
        cache.insert("s1", "exec", GuardianDecision::block("not asked"));
        clock.advance(Duration::from_secs(4));

        let hit = cache.get("s1", "exec").unwrap();
        assert_eq!(hit.decision, GuardianDecision::block("not asked"));
    }

    #[test]
    fn test_tool_name_is_case_insensitive() {
        let (mut cache, _) = cache();
        cache.insert("s1", "Exec", GuardianDecision::allow(None));
        assert!(cache.get("s1", "EXEC").is_some());
    }

    #[test]
    fn test_keys_are_per_session_and_tool() {
        let (mut cache, _) = cache();
        cache.insert("s1", "exec", GuardianDecision::allow(None));
        assert!(cache.get("s2", "exec").is_none());
        assert!(cache.get("s1", "write").is_none());
    }

    #[test]
    fn test_no_collision_between_similar_keys() {
        let (mut cache, _) = cache();
        cache.insert("a:b", "c", GuardianDecision::allow(None));
        assert!(cache.get("a", "b:c").is_none());
    }

    #[test]
    fn test_expires_after_ttl() {
        let (mut cache, clock) = cache();
        cache.insert("s1", "exec", GuardianDecision::allow(None));
        clock.advance(DecisionCache::DEFAULT_TTL + Duration::from_millis(1));
        assert!(cache.get("s1", "exec").is_none());
        assert_eq!(cache.size(), 0);
    }

    #[test]
    fn test_capacity_bound() {
        let clock = Arc::new(ManualClock::new());
        let mut cache = DecisionCache::with_limits(clock, Duration::from_secs(5), 2);
        cache.insert("s1", "a", GuardianDecision::allow(None));
        cache.insert("s1", "b", GuardianDecision::allow(None));
        cache.insert("s1", "c", GuardianDecision::allow(None));
        assert_eq!(cache.size(), 2);
        assert!(cache.get("s1", "a").is_none());
    }

    #[test]
    fn test_clear() {
        let (mut cache, _) = cache();
        cache.insert("s1", "exec", GuardianDecision::allow(None));
        cache.clear();
        assert!(cache.get("s1", "exec").is_none());
    }
}
