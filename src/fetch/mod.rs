//! Dynamic metadata fetching
//!
//! Retrieves raw per-country records from an [`AddressFormatSource`], caches
//! them for the lifetime of the fetcher and normalizes them on the way out.
//! Every source failure is absorbed here: callers only ever see `None`.

pub mod cache;
pub mod normalize;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::config::AddressConfig;
use crate::models::{CountryCode, NormalizedMetadata};
use crate::source::{AddressFormatSource, RawExternalRecord, SourceError};

pub use cache::{CacheLookup, MetadataCache};
pub use normalize::normalize_record;

/// Outcome of one request, shared by every caller that joined it
type InFlight = Arc<OnceCell<Option<Arc<RawExternalRecord>>>>;

/// Caching fetcher over an address-format source
pub struct MetadataFetcher<S> {
    source: S,
    cache: MetadataCache,
    /// Requests currently in flight, by country
    in_flight: Mutex<HashMap<CountryCode, InFlight>>,
    request_timeout: Option<Duration>,
    coalesce_requests: bool,
}

impl<S: AddressFormatSource> MetadataFetcher<S> {
    /// Create a fetcher with default configuration
    pub fn new(source: S) -> Self {
        Self::with_config(source, &AddressConfig::default())
    }

    /// Create a fetcher from configuration
    pub fn with_config(source: S, config: &AddressConfig) -> Self {
        Self {
            source,
            cache: MetadataCache::new(config.failure_ttl()),
            in_flight: Mutex::new(HashMap::new()),
            request_timeout: (config.timeout_secs > 0).then(|| config.request_timeout()),
            coalesce_requests: config.coalesce_requests,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn cache(&self) -> &MetadataCache {
        &self.cache
    }

    /// Fetch normalized metadata for a country.
    ///
    /// Returns `None` for an empty code (without I/O), for a failure
    /// remembered by the cache, and whenever the source fails.
    pub async fn fetch(&self, country: impl Into<CountryCode>) -> Option<NormalizedMetadata> {
        let country = country.into();
        self.fetch_raw(&country)
            .await
            .map(|record| normalize_record(&record))
    }

    /// Fetch the raw record for a country, going through the cache
    pub async fn fetch_raw(&self, country: &CountryCode) -> Option<Arc<RawExternalRecord>> {
        if country.is_empty() {
            return None;
        }

        if let Some(cached) = self.cached(country) {
            return cached;
        }

        if !self.coalesce_requests {
            return self.request(country).await;
        }

        // Every caller joining this flight gets the same outcome, failures included.
        let flight = self.join_flight(country);
        let result = flight
            .get_or_init(|| async {
                match self.cached(country) {
                    Some(cached) => cached,
                    None => self.request(country).await,
                }
            })
            .await
            .clone();
        self.finish_flight(country, &flight);
        result
    }

    /// Countries with a cached record or remembered failure
    pub fn cached_countries(&self) -> Vec<CountryCode> {
        self.cache.countries()
    }

    /// Drop every cached record and remembered failure
    pub fn clear(&self) {
        self.cache.clear();
        // Requests already running still answer their callers, but nobody new joins them.
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        info!("Cleared address metadata cache");
    }

    /// `Some(result)` when the cache answers without a request
    fn cached(&self, country: &CountryCode) -> Option<Option<Arc<RawExternalRecord>>> {
        match self.cache.lookup(country) {
            CacheLookup::Hit(record) => {
                debug!("Address format cache hit for {}", country);
                Some(Some(record))
            }
            CacheLookup::KnownFailure => {
                debug!("Address format for {} recently failed, not retrying", country);
                Some(None)
            }
            CacheLookup::Miss => None,
        }
    }

    async fn request(&self, country: &CountryCode) -> Option<Arc<RawExternalRecord>> {
        let generation = self.cache.generation();

        match self.request_with_timeout(country).await {
            Ok(record) => {
                let record = Arc::new(record);
                self.cache.store(generation, country.clone(), Arc::clone(&record));
                info!(
                    "Loaded address format for {} from {} source",
                    country,
                    self.source.name()
                );
                Some(record)
            }
            Err(e) => {
                warn!(
                    "Address format for {} unavailable from {} source: {}",
                    country,
                    self.source.name(),
                    e
                );
                self.cache.mark_failed(generation, country.clone());
                None
            }
        }
    }

    async fn request_with_timeout(
        &self,
        country: &CountryCode,
    ) -> Result<RawExternalRecord, SourceError> {
        match self.request_timeout {
            Some(timeout) => tokio::time::timeout(timeout, self.source.fetch_record(country))
                .await
                .map_err(|_| SourceError::Timeout(timeout))?,
            None => self.source.fetch_record(country).await,
        }
    }

    fn join_flight(&self, country: &CountryCode) -> InFlight {
        let mut flights = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(flights.entry(country.clone()).or_default())
    }

    /// Retire a completed flight so later misses start a fresh request
    fn finish_flight(&self, country: &CountryCode, flight: &InFlight) {
        let mut flights = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if flights.get(country).is_some_and(|current| Arc::ptr_eq(current, flight)) {
            flights.remove(country);
        }
    }
}
