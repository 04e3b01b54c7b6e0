//! Address Metadata SDK - country-aware address form metadata
//!
//! Provides:
//! - Decoding of the address-format service's compact encodings
//! - Cached, failure-tolerant fetching of per-country records
//! - A static override table and deterministic merge precedence
//! - Per-field validation and value transforms for form callers
//!
//! # Example
//!
//! ```rust
//! use address_metadata::{FieldName, MetadataResolver, source::memory::InMemorySource};
//!
//! let resolver = MetadataResolver::new(InMemorySource::new());
//! let us = resolver.resolve_static("us");
//! assert!(us.is_required(FieldName::PostalCode));
//! assert!(us.validate_field(FieldName::PostalCode, "12345").is_valid);
//! ```

pub mod cli;
pub mod config;
pub mod fetch;
pub mod format;
pub mod models;
pub mod resolver;
pub mod source;
pub mod validation;

// Re-export commonly used types
pub use config::{AddressConfig, ConfigError};
pub use fetch::{MetadataCache, MetadataFetcher};
pub use format::{parse_format, parse_required};
pub use models::{
    CountryCode, FieldDescriptor, FieldKind, FieldName, LayoutCell, LayoutRow,
    NormalizedMetadata, SelectOption, ValueTransform, country_code_from_name,
};
pub use resolver::{MetadataResolver, StaticOverride, StaticOverrideTable};
#[cfg(feature = "api-backend")]
pub use source::api::ApiAddressSource;
pub use source::{AddressFormatSource, RawExternalRecord, SourceError};
pub use validation::ValidationResult;
