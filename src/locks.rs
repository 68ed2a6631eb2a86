//! Per-user exclusive locks serializing balance mutations.
//!
//! Nothing in the storage contract serializes two requests touching the same
//! user, so the services wrap every validate-and-mutate sequence in an async
//! critical section keyed by phone number. Phone numbers are unique and
//! immutable, which makes them usable as lock keys before any lookup has
//! happened.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Registry of per-user mutexes, created lazily on first use.
///
/// Entries are never evicted; the map grows with the user population, same as
/// the users table.
#[derive(Default)]
pub struct LockRegistry {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl LockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&self, phone_number: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(phone_number.to_string())
            .or_default()
            .clone()
    }

    /// Acquire the exclusive lock for a single user.
    pub async fn acquire(&self, phone_number: &str) -> OwnedMutexGuard<()> {
        self.entry(phone_number).lock_owned().await
    }

    /// Acquire the locks for two distinct users.
    ///
    /// Locks are always taken in lexicographic key order, so two crossed
    /// transfers (A to B and B to A) cannot deadlock. Callers must reject
    /// identical phone numbers before calling this.
    pub async fn acquire_pair(
        &self,
        a: &str,
        b: &str,
    ) -> (OwnedMutexGuard<()>, OwnedMutexGuard<()>) {
        debug_assert_ne!(a, b);
        let (first, second) = if a < b { (a, b) } else { (b, a) };
        let first_guard = self.entry(first).lock_owned().await;
        let second_guard = self.entry(second).lock_owned().await;
        (first_guard, second_guard)
    }
}
