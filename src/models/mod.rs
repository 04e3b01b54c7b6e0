//! Models for address metadata
//!
//! Country codes, the field vocabulary, per-field descriptors and the
//! normalized metadata record consumed by address forms.

pub mod country;
pub mod field;
pub mod metadata;

pub use country::{CountryCode, country_code_from_name};
pub use field::{
    FieldDescriptor, FieldKind, FieldName, FieldPattern, SelectOption, UnknownFieldError,
    ValueTransform,
};
pub use metadata::{InvariantViolation, LayoutCell, LayoutRow, NormalizedMetadata};
