//! TTL- and capacity-bounded map shared by both guardian caches.
//!
//! Eviction is by insertion order, not access order: reads never refresh an
//! entry, and overwriting a key keeps its original position.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

#[derive(Debug)]
pub(crate) struct Stored<V> {
    pub value: V,
    pub stored_at: Instant,
    seq: u64,
}

#[derive(Debug)]
pub(crate) struct ExpiringMap<K, V> {
    entries: HashMap<K, Stored<V>>,
    next_seq: u64,
    ttl: Duration,
    capacity: usize,
}

impl<K: Hash + Eq + Clone, V> ExpiringMap<K, V> {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            next_seq: 0,
            ttl,
            capacity,
        }
    }

    /// Insert or replace, then evict.
    pub fn insert(&mut self, key: K, value: V, now: Instant) {
        let seq = match self.entries.get(&key) {
            Some(existing) => existing.seq,
            None => {
                self.next_seq += 1;
                self.next_seq
            }
        };
        self.entries.insert(
            key,
            Stored {
                value,
                stored_at: now,
                seq,
            },
        );
        self.evict(now);
    }

    /// Live entry for `key`; an expired entry is removed and `None` returned.
    pub fn get_live(&mut self, key: &K, now: Instant) -> Option<&Stored<V>> {
        let expired = self
            .entries
            .get(key)
            .map(|stored| self.is_expired(stored, now))?;
        if expired {
            self.entries.remove(key);
            return None;
        }
        self.entries.get(key)
    }

    /// Drop expired entries, then the oldest-inserted until within capacity.
    pub fn evict(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.entries
            .retain(|_, stored| now.saturating_duration_since(stored.stored_at) <= ttl);

        while self.entries.len() > self.capacity {
            let Some(oldest) = self
                .entries
                .iter()
                .min_by_key(|(_, stored)| stored.seq)
                .map(|(key, _)| key.clone())
            else {
                break;
            };
            self.entries.remove(&oldest);
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Raw entry count, expired entries included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    fn is_expired(&self, stored: &Stored<V>, now: Instant) -> bool {
        now.saturating_duration_since(stored.stored_at) > self.ttl
    }
}
