//! Request cache with in-flight de-duplication.
//!
//! One map of completed entries with per-class lifetimes, one map of
//! in-flight fetches. Concurrent requests for the same key join the
//! single shared future instead of issuing a second network call, which
//! is the load-bearing property of the data layer.

use crate::error::ContentError;
use crate::query::QueryKey;
use futures::future::{LocalBoxFuture, Shared};
use serde_json::Value;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// A fetch in flight, shared by every caller that requested its key.
pub type SharedFetch = Shared<LocalBoxFuture<'static, Result<Rc<Value>, ContentError>>>;

/// Outcome of a cache lookup, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// Fresh entry served.
    Hit,
    /// Nothing usable; a fetch was started.
    Miss,
    /// Joined an already in-flight fetch.
    Joined,
}

impl std::fmt::Display for CacheStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hit => write!(f, "HIT"),
            Self::Miss => write!(f, "MISS"),
            Self::Joined => write!(f, "JOINED"),
        }
    }
}

/// A completed query result with its lifetime.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: Rc<Value>,
    stored_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    fn is_fresh(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.stored_at) < self.ttl
    }
}

/// The per-client request cache.
#[derive(Default)]
pub struct QueryCache {
    entries: HashMap<QueryKey, CacheEntry>,
    inflight: HashMap<QueryKey, SharedFetch>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh entry for the key, if any. Expired entries are left in
    /// place; [`QueryCache::store`] overwrites them on completion.
    pub fn lookup(&self, key: &QueryKey, now: Instant) -> Option<Rc<Value>> {
        self.entries
            .get(key)
            .filter(|entry| entry.is_fresh(now))
            .map(|entry| Rc::clone(&entry.value))
    }

    /// The in-flight fetch for the key, if any.
    pub fn inflight(&self, key: &QueryKey) -> Option<SharedFetch> {
        self.inflight.get(key).cloned()
    }

    /// Register a fetch as in flight.
    pub fn start(&mut self, key: QueryKey, fetch: SharedFetch) {
        self.inflight.insert(key, fetch);
    }

    /// Record a completed fetch: clear the in-flight slot and store the
    /// value for the class lifetime. Idempotent; every joined caller
    /// settles the same result.
    pub fn store(&mut self, key: &QueryKey, value: Rc<Value>, now: Instant, ttl: Duration) {
        self.inflight.remove(key);
        self.entries.insert(
            key.clone(),
            CacheEntry {
                value,
                stored_at: now,
                ttl,
            },
        );
    }

    /// Record a failed fetch: clear the in-flight slot, cache nothing.
    pub fn fail(&mut self, key: &QueryKey) {
        self.inflight.remove(key);
    }

    /// Drop expired entries.
    pub fn purge_expired(&mut self, now: Instant) {
        self.entries.retain(|_, entry| entry.is_fresh(now));
    }

    /// Number of stored entries (expired included until purged).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop everything, in-flight registrations included.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.inflight.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::ContentQuery;
    use futures::FutureExt;

    fn key() -> QueryKey {
        ContentQuery::all_products().cache_key()
    }

    fn shared_ok(value: Value) -> SharedFetch {
        let rc = Rc::new(value);
        async move { Ok(rc) }.boxed_local().shared()
    }

    #[test]
    fn test_lookup_respects_ttl() {
        let mut cache = QueryCache::new();
        let now = Instant::now();
        let ttl = Duration::from_secs(300);
        cache.store(&key(), Rc::new(Value::from(1)), now, ttl);

        assert!(cache.lookup(&key(), now).is_some());
        assert!(cache
            .lookup(&key(), now + Duration::from_secs(299))
            .is_some());
        assert!(cache.lookup(&key(), now + Duration::from_secs(300)).is_none());
        assert!(cache.lookup(&key(), now + Duration::from_secs(301)).is_none());
    }

    #[test]
    fn test_store_clears_inflight() {
        let mut cache = QueryCache::new();
        cache.start(key(), shared_ok(Value::from(1)));
        assert!(cache.inflight(&key()).is_some());

        cache.store(
            &key(),
            Rc::new(Value::from(1)),
            Instant::now(),
            Duration::from_secs(60),
        );
        assert!(cache.inflight(&key()).is_none());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_fail_caches_nothing() {
        let mut cache = QueryCache::new();
        cache.start(key(), shared_ok(Value::from(1)));
        cache.fail(&key());

        assert!(cache.inflight(&key()).is_none());
        assert!(cache.lookup(&key(), Instant::now()).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_purge_expired() {
        let mut cache = QueryCache::new();
        let now = Instant::now();
        cache.store(&key(), Rc::new(Value::from(1)), now, Duration::from_secs(1));
        let search_key = ContentQuery::search("jam").cache_key();
        cache.store(
            &search_key,
            Rc::new(Value::from(2)),
            now,
            Duration::from_secs(600),
        );

        cache.purge_expired(now + Duration::from_secs(30));
        assert_eq!(cache.len(), 1);
        assert!(cache.lookup(&search_key, now + Duration::from_secs(30)).is_some());
    }
}
