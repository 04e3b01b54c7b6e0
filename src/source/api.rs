//! API address source
//!
//! Implements AddressFormatSource for the HTTP address-format service.
//! One GET per country: `{base_url}/{CODE}` returning a JSON object.
//!
//! ## Security
//!
//! Country codes are validated before they are placed in a URL path.
//! Only two ASCII letters are allowed.

use super::{AddressFormatSource, RawExternalRecord, SourceError};
use crate::config::{AddressConfig, DEFAULT_SERVICE_URL};
use crate::models::CountryCode;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Validate a country code for safe use in API paths.
fn validate_country_code(country: &CountryCode) -> Result<(), SourceError> {
    if !country.is_well_formed() {
        return Err(SourceError::InvalidCountryCode(country.to_string()));
    }
    Ok(())
}

/// Address source that queries the HTTP address-format service
pub struct ApiAddressSource {
    base_url: String,
    timeout: Option<Duration>,
    client: reqwest::Client,
}

impl ApiAddressSource {
    /// Create a new API address source
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the service, without a trailing country segment
    ///
    /// # Example
    ///
    /// ```rust
    /// use address_metadata::source::api::ApiAddressSource;
    ///
    /// let source = ApiAddressSource::new("https://chromium-i18n.appspot.com/ssl-address/data/");
    /// assert!(source.url_for(&"us".into()).ends_with("/ssl-address/data/US"));
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Some(Duration::from_secs(10)),
            client: reqwest::Client::new(),
        }
    }

    /// Create a source from configuration
    pub fn from_config(config: &AddressConfig) -> Self {
        let source = Self::new(config.service_url.clone());
        if config.timeout_secs == 0 {
            source.without_timeout()
        } else {
            source.with_timeout(config.request_timeout())
        }
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Leave requests bounded only by the transport
    pub fn without_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL queried for a country
    pub fn url_for(&self, country: &CountryCode) -> String {
        format!("{}/{}", self.base_url, urlencoding::encode(country.as_str()))
    }
}

impl Default for ApiAddressSource {
    fn default() -> Self {
        Self::new(DEFAULT_SERVICE_URL)
    }
}

#[async_trait]
impl AddressFormatSource for ApiAddressSource {
    async fn fetch_record(&self, country: &CountryCode) -> Result<RawExternalRecord, SourceError> {
        validate_country_code(country)?;

        let url = self.url_for(country);
        debug!("Fetching address format from {}", url);

        let mut request = self.client.get(&url);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SourceError::Timeout(self.timeout.unwrap_or_default())
                } else {
                    SourceError::NetworkError(format!("Failed to fetch {}: {}", country, e))
                }
            })?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(SourceError::NotFound(country.to_string()));
        }

        if !response.status().is_success() {
            return Err(SourceError::BackendError(format!(
                "Address format request for {} failed: {}",
                country,
                response.status()
            )));
        }

        let record: RawExternalRecord = response.json().await.map_err(|e| {
            SourceError::SerializationError(format!(
                "Failed to parse address format for {}: {}",
                country, e
            ))
        })?;

        Ok(record)
    }

    fn name(&self) -> &str {
        "api"
    }
}
