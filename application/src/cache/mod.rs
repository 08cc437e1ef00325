//! In-memory caches owned by the composition root.
//!
//! - [`TurnCache`]: recent conversation turns per session
//! - [`DecisionCache`]: short-lived verdicts per (session, tool)
//!
//! [`GuardianCaches`] bundles both behind mutexes so the use cases can share
//! them. Locks are only ever held for a synchronous map operation, never
//! across an `.await`.

mod decision_cache;
mod expiring_map;
mod turn_cache;

pub use decision_cache::{CachedDecision, DecisionCache};
pub use turn_cache::{CachedMessages, TurnCache};

use crate::ports::clock::{Clock, SystemClock};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub struct GuardianCaches {
    turns: Mutex<TurnCache>,
    decisions: Mutex<DecisionCache>,
}

impl GuardianCaches {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::from_parts(TurnCache::new(clock.clone()), DecisionCache::new(clock))
    }

    pub fn from_parts(turns: TurnCache, decisions: DecisionCache) -> Self {
        Self {
            turns: Mutex::new(turns),
            decisions: Mutex::new(decisions),
        }
    }

    pub fn turns(&self) -> MutexGuard<'_, TurnCache> {
        self.turns.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn decisions(&self) -> MutexGuard<'_, DecisionCache> {
        self.decisions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Discard every cached turn and verdict.
    pub fn clear(&self) {
        self.turns().clear();
        self.decisions().clear();
    }
}

impl Default for GuardianCaches {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}
