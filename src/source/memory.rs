//! In-memory address source
//!
//! Serves preloaded records without network access. Records can be loaded
//! from a JSON snapshot keyed by country code:
//!
//! ```json
//! { "US": { "fmt": "%A%n%C, %S %Z", "require": "ACSZ" } }
//! ```

use super::{AddressFormatSource, RawExternalRecord, SourceError};
use crate::models::CountryCode;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Address source backed by a fixed map of records
#[derive(Debug, Default)]
pub struct InMemorySource {
    records: HashMap<CountryCode, RawExternalRecord>,
    requests: AtomicUsize,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the record for a country
    pub fn with_record(
        mut self,
        country: impl Into<CountryCode>,
        record: RawExternalRecord,
    ) -> Self {
        self.records.insert(country.into(), record);
        self
    }

    /// Load a snapshot of `{ "CODE": record }` pairs
    pub fn from_json_str(json: &str) -> Result<Self, SourceError> {
        let raw: HashMap<String, RawExternalRecord> = serde_json::from_str(json)?;
        Ok(Self {
            records: raw
                .into_iter()
                .map(|(code, record)| (CountryCode::new(code), record))
                .collect(),
            requests: AtomicUsize::new(0),
        })
    }

    /// Number of `fetch_record` calls served so far
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn countries(&self) -> Vec<&CountryCode> {
        let mut countries: Vec<_> = self.records.keys().collect();
        countries.sort();
        countries
    }
}

#[async_trait]
impl AddressFormatSource for InMemorySource {
    async fn fetch_record(&self, country: &CountryCode) -> Result<RawExternalRecord, SourceError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.records
            .get(country)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(country.to_string()))
    }

    fn name(&self) -> &str {
        "memory"
    }
}
