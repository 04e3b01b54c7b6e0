//! Address-format source abstraction
//!
//! Defines the AddressFormatSource trait and implementations for different sources:
//! - ApiAddressSource: HTTP address-format service (default)
//! - InMemorySource: preloaded records, e.g. from a JSON snapshot

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::CountryCode;

#[cfg(feature = "api-backend")]
pub mod api;
pub mod memory;

/// Error type for source operations
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Invalid country code: {0:?}")]
    InvalidCountryCode(String),
    #[error("No address data for {0}")]
    NotFound(String),
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Address service error: {0}")]
    BackendError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::SerializationError(err.to_string())
    }
}

/// One country's record as returned by the address-format service
///
/// All fields are optional; the service omits whatever a country lacks.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawExternalRecord {
    /// Display format, e.g. `%N%n%O%n%A%n%C, %S %Z`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fmt: Option<String>,
    /// Required field codes, e.g. `ACSZ`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require: Option<String>,
    /// Codes of fields that are written in uppercase
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper: Option<String>,
    /// Postcode validation pattern
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_name_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_name_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locality_name_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sublocality_name_type: Option<String>,
    /// Comma-separated postcode examples
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zipex: Option<String>,
}

/// Trait for address-format sources
///
/// One call is one outbound request; caching and failure handling belong to
/// the fetcher.
#[async_trait]
pub trait AddressFormatSource: Send + Sync {
    /// Fetch the raw record for a normalized country code
    async fn fetch_record(&self, country: &CountryCode) -> Result<RawExternalRecord, SourceError>;

    /// Short name used in log messages
    fn name(&self) -> &str;
}

#[async_trait]
impl<T: AddressFormatSource + ?Sized> AddressFormatSource for std::sync::Arc<T> {
    async fn fetch_record(&self, country: &CountryCode) -> Result<RawExternalRecord, SourceError> {
        (**self).fetch_record(country).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_record_deserialize_partial() {
        let json = r#"{"fmt":"%A%n%C %Z","require":"ACZ","zip":"\\d{4}","unknown":"ignored"}"#;
        let record: RawExternalRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.fmt.as_deref(), Some("%A%n%C %Z"));
        assert_eq!(record.require.as_deref(), Some("ACZ"));
        assert_eq!(record.zip.as_deref(), Some(r"\d{4}"));
        assert!(record.upper.is_none());
        assert!(record.zipex.is_none());
    }

    #[test]
    fn test_error_display() {
        let err = SourceError::Timeout(Duration::from_secs(10));
        assert_eq!(err.to_string(), "Request timed out after 10s");

        let err = SourceError::Timeout(Duration::from_millis(250));
        assert_eq!(err.to_string(), "Request timed out after 250ms");

        let err = SourceError::BackendError("HTTP 503".to_string());
        assert_eq!(err.to_string(), "Address service error: HTTP 503");
    }

    #[test]
    fn test_error_from_serde() {
        let json_err = serde_json::from_str::<RawExternalRecord>("not json").unwrap_err();
        let err: SourceError = json_err.into();
        assert!(matches!(err, SourceError::SerializationError(_)));
    }
}
