//! Metadata resolution
//!
//! Produces the final [`NormalizedMetadata`] for a country:
//! - `resolve_static`: static table only, no I/O, for the first render
//! - `resolve_dynamic`: dynamic record merged with the static override,
//!   falling back to the static record when the source is unavailable
//!
//! Neither path can fail.

mod builtin;
pub mod merge;
pub mod overrides;

use std::sync::Arc;

use tracing::debug;

use crate::config::AddressConfig;
use crate::fetch::MetadataFetcher;
use crate::models::{CountryCode, FieldName, NormalizedMetadata};
use crate::source::AddressFormatSource;
use crate::validation::ValidationResult;

pub use merge::merge_with_override;
pub use overrides::{DEFAULT_KEY, StaticOverride, StaticOverrideTable};

/// Resolver over a dynamic source and a static override table
pub struct MetadataResolver<S> {
    fetcher: MetadataFetcher<S>,
    table: Arc<StaticOverrideTable>,
}

impl<S: AddressFormatSource> MetadataResolver<S> {
    /// Create a resolver with default configuration and the built-in table
    pub fn new(source: S) -> Self {
        Self::with_config(source, &AddressConfig::default())
    }

    /// Create a resolver from configuration
    pub fn with_config(source: S, config: &AddressConfig) -> Self {
        Self {
            fetcher: MetadataFetcher::with_config(source, config),
            table: StaticOverrideTable::builtin(),
        }
    }

    /// Replace the static override table
    pub fn with_table(mut self, table: Arc<StaticOverrideTable>) -> Self {
        self.table = table;
        self
    }

    pub fn fetcher(&self) -> &MetadataFetcher<S> {
        &self.fetcher
    }

    pub fn table(&self) -> &StaticOverrideTable {
        &self.table
    }

    /// Static metadata for a country; unknown and empty codes get `DEFAULT`
    pub fn resolve_static(&self, country: &str) -> NormalizedMetadata {
        self.static_metadata(&CountryCode::new(country)).clone()
    }

    /// Dynamic metadata merged with the static override for the country.
    ///
    /// Falls back to [`resolve_static`](Self::resolve_static) when the source
    /// yields nothing.
    pub async fn resolve_dynamic(&self, country: &str) -> NormalizedMetadata {
        let country = CountryCode::new(country);
        if country.is_empty() {
            return self.table.default_metadata().clone();
        }

        let Some(dynamic) = self.fetcher.fetch(country.clone()).await else {
            debug!("Using static address metadata for {}", country);
            return self.static_metadata(&country).clone();
        };

        match self.table.get(&country) {
            Some(over) => merge_with_override(dynamic, over),
            None => dynamic,
        }
    }

    /// Drop all cached dynamic records
    pub fn clear_cache(&self) {
        self.fetcher.clear();
    }

    pub fn is_required_field(&self, country: &str, field: FieldName) -> bool {
        self.static_metadata(&CountryCode::new(country)).is_required(field)
    }

    pub fn is_optional_field(&self, country: &str, field: FieldName) -> bool {
        self.static_metadata(&CountryCode::new(country)).is_optional(field)
    }

    pub fn all_fields(&self, country: &str) -> Vec<FieldName> {
        self.static_metadata(&CountryCode::new(country)).all_fields()
    }

    pub fn validate_field(&self, country: &str, field: FieldName, value: &str) -> ValidationResult {
        self.static_metadata(&CountryCode::new(country)).validate_field(field, value)
    }

    pub fn transform_value(
        &self,
        country: &str,
        field: FieldName,
        value: Option<&str>,
    ) -> Option<String> {
        self.static_metadata(&CountryCode::new(country)).transform_value(field, value)
    }

    fn static_metadata(&self, country: &CountryCode) -> &NormalizedMetadata {
        self.table.resolve(country)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::memory::InMemorySource;
    use crate::source::RawExternalRecord;

    fn resolver() -> MetadataResolver<InMemorySource> {
        MetadataResolver::new(InMemorySource::new().with_record(
            "US",
            RawExternalRecord {
                fmt: Some("%N%n%O%n%A%n%C, %S %Z".to_string()),
                require: Some("ACSZ".to_string()),
                state_name_type: Some("state".to_string()),
                ..Default::default()
            },
        ))
    }

    #[test]
    fn test_resolve_static_is_case_insensitive() {
        let resolver = resolver();
        assert_eq!(resolver.resolve_static("us"), resolver.resolve_static("US"));
        assert_eq!(resolver.resolve_static(" gb "), resolver.resolve_static("GB"));
    }

    #[tokio::test]
    async fn test_empty_code_skips_fetcher() {
        let resolver = resolver();
        let metadata = resolver.resolve_dynamic("").await;
        assert_eq!(&metadata, resolver.table().default_metadata());
        assert_eq!(resolver.fetcher().source().request_count(), 0);
    }

    #[tokio::test]
    async fn test_dynamic_state_replaced_by_static_select() {
        let resolver = resolver();
        let metadata = resolver.resolve_dynamic("us").await;
        let state = &metadata.fields[&FieldName::State];
        assert!(state.kind.is_select());
        assert!(!state.kind.options().is_empty());
        assert_eq!(metadata.check_invariants(), Ok(()));
    }

    #[tokio::test]
    async fn test_country_without_override_uses_dynamic_record() {
        let resolver = MetadataResolver::new(InMemorySource::new().with_record(
            "NZ",
            RawExternalRecord {
                fmt: Some("%N%n%O%n%A%n%D%n%C %Z".to_string()),
                require: Some("ACZ".to_string()),
                ..Default::default()
            },
        ));
        let metadata = resolver.resolve_dynamic("NZ").await;
        assert_eq!(metadata.format, "%N%n%O%n%A%n%D%n%C %Z");
        assert!(metadata.is_optional(FieldName::DependentLocality));
    }

    #[test]
    fn test_query_helpers_by_country() {
        let resolver = resolver();
        assert!(resolver.is_required_field("US", FieldName::State));
        assert!(!resolver.is_optional_field("US", FieldName::State));
        assert!(!resolver.is_required_field("US", FieldName::SortingCode));
        assert!(!resolver.is_optional_field("US", FieldName::SortingCode));
        assert_eq!(resolver.all_fields("US")[0], FieldName::Address);
        assert_eq!(
            resolver.transform_value("GB", FieldName::PostalCode, Some("sw1a 1aa")),
            Some("SW1A 1AA".to_string())
        );
    }
}
