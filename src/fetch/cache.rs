//! Per-country cache of raw address-format records
//!
//! Owned by a [`MetadataFetcher`](super::MetadataFetcher); independent
//! fetchers never share entries.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use crate::models::CountryCode;
use crate::source::RawExternalRecord;

#[derive(Debug, Clone)]
enum CacheEntry {
    Ready(Arc<RawExternalRecord>),
    Failed { at: Instant },
}

/// Result of a cache lookup
#[derive(Debug, Clone, PartialEq)]
pub enum CacheLookup {
    Hit(Arc<RawExternalRecord>),
    /// A failure recorded within the failure TTL
    KnownFailure,
    Miss,
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<CountryCode, CacheEntry>,
    /// Bumped by `clear()`; writes carrying an older generation are dropped
    generation: u64,
}

/// Cache of raw records keyed by normalized country code
#[derive(Debug)]
pub struct MetadataCache {
    state: Mutex<CacheState>,
    failure_ttl: Duration,
}

impl MetadataCache {
    /// Create a cache that remembers failures for `failure_ttl`.
    ///
    /// A zero TTL records no failures at all.
    pub fn new(failure_ttl: Duration) -> Self {
        Self {
            state: Mutex::new(CacheState::default()),
            failure_ttl,
        }
    }

    fn state(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn failure_ttl(&self) -> Duration {
        self.failure_ttl
    }

    pub fn lookup(&self, country: &CountryCode) -> CacheLookup {
        let mut state = self.state();
        match state.entries.get(country) {
            Some(CacheEntry::Ready(record)) => CacheLookup::Hit(Arc::clone(record)),
            Some(CacheEntry::Failed { at }) if at.elapsed() < self.failure_ttl => {
                CacheLookup::KnownFailure
            }
            Some(CacheEntry::Failed { .. }) => {
                state.entries.remove(country);
                CacheLookup::Miss
            }
            None => CacheLookup::Miss,
        }
    }

    /// Current generation, taken before a request is issued
    pub fn generation(&self) -> u64 {
        self.state().generation
    }

    /// Store a fetched record unless the cache was cleared since `generation`
    pub fn store(
        &self,
        generation: u64,
        country: CountryCode,
        record: Arc<RawExternalRecord>,
    ) -> bool {
        let mut state = self.state();
        if state.generation != generation {
            return false;
        }
        state.entries.insert(country, CacheEntry::Ready(record));
        true
    }

    /// Record a failed fetch unless the cache was cleared since `generation`
    pub fn mark_failed(&self, generation: u64, country: CountryCode) -> bool {
        if self.failure_ttl.is_zero() {
            return false;
        }
        let mut state = self.state();
        if state.generation != generation {
            return false;
        }
        state
            .entries
            .insert(country, CacheEntry::Failed { at: Instant::now() });
        true
    }

    /// Drop every entry
    pub fn clear(&self) {
        let mut state = self.state();
        state.entries.clear();
        state.generation += 1;
    }

    pub fn len(&self) -> usize {
        self.state().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Countries with an entry, sorted
    pub fn countries(&self) -> Vec<CountryCode> {
        let mut countries: Vec<_> = self.state().entries.keys().cloned().collect();
        countries.sort();
        countries
    }
}

impl Default for MetadataCache {
    fn default() -> Self {
        Self::new(Duration::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> Arc<RawExternalRecord> {
        Arc::new(RawExternalRecord {
            fmt: Some("%A%n%C".to_string()),
            ..Default::default()
        })
    }

    #[test]
    fn test_store_and_lookup() {
        let cache = MetadataCache::default();
        let us = CountryCode::new("US");
        assert_eq!(cache.lookup(&us), CacheLookup::Miss);

        assert!(cache.store(cache.generation(), us.clone(), record()));
        assert_eq!(cache.lookup(&us), CacheLookup::Hit(record()));
        assert_eq!(cache.countries(), vec![us]);
    }

    #[test]
    fn test_zero_ttl_records_no_failure() {
        let cache = MetadataCache::default();
        let fr = CountryCode::new("FR");
        assert!(!cache.mark_failed(cache.generation(), fr.clone()));
        assert_eq!(cache.lookup(&fr), CacheLookup::Miss);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_failure_remembered_within_ttl() {
        let cache = MetadataCache::new(Duration::from_secs(60));
        let fr = CountryCode::new("FR");
        assert!(cache.mark_failed(cache.generation(), fr.clone()));
        assert_eq!(cache.lookup(&fr), CacheLookup::KnownFailure);
    }

    #[test]
    fn test_expired_failure_is_a_miss() {
        let cache = MetadataCache::new(Duration::from_millis(1));
        let fr = CountryCode::new("FR");
        cache.mark_failed(cache.generation(), fr.clone());
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(cache.lookup(&fr), CacheLookup::Miss);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_clear_rejects_stale_writes() {
        let cache = MetadataCache::default();
        let before = cache.generation();
        cache.store(before, CountryCode::new("US"), record());

        cache.clear();
        assert!(cache.is_empty());

        // A fetch that started before clear() must not repopulate the cache.
        assert!(!cache.store(before, CountryCode::new("DE"), record()));
        assert!(cache.is_empty());
        assert!(cache.store(cache.generation(), CountryCode::new("DE"), record()));
    }
}
