//! Field validation and value transforms
//!
//! Pure per-keystroke helpers over resolved metadata. A failed check is an
//! ordinary [`ValidationResult`], never an error.

use serde::{Deserialize, Serialize};

use crate::models::{FieldName, NormalizedMetadata};

/// Message for a blank required field
pub const REQUIRED_MESSAGE: &str = "This field is required";

/// Message for a pattern mismatch when the field configures none
pub const INVALID_FORMAT_MESSAGE: &str = "Invalid format";

/// Outcome of validating one field value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: Some(error.into()),
        }
    }
}

impl NormalizedMetadata {
    /// Validate a value for `field`.
    ///
    /// Blank required values fail; every other value must match the field's
    /// pattern after trimming, blank ones included. Fields without a
    /// descriptor always pass.
    pub fn validate_field(&self, field: FieldName, value: &str) -> ValidationResult {
        let Some(descriptor) = self.fields.get(&field) else {
            return ValidationResult::valid();
        };

        let trimmed = value.trim();
        if trimmed.is_empty() && self.is_required(field) {
            return ValidationResult::invalid(REQUIRED_MESSAGE);
        }

        match &descriptor.pattern {
            Some(pattern) if !pattern.is_match(trimmed) => ValidationResult::invalid(
                descriptor
                    .error_message
                    .clone()
                    .unwrap_or_else(|| INVALID_FORMAT_MESSAGE.to_string()),
            ),
            _ => ValidationResult::valid(),
        }
    }

    /// Apply the field's transform; anything else passes through unchanged
    pub fn transform_value(&self, field: FieldName, value: Option<&str>) -> Option<String> {
        let value = value?;
        let transform = self.fields.get(&field).and_then(|d| d.transform);
        Some(match transform {
            Some(transform) => transform.apply(value),
            None => value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::normalize_record;
    use crate::source::RawExternalRecord;

    fn metadata() -> NormalizedMetadata {
        normalize_record(&RawExternalRecord {
            fmt: Some("%N%n%A%n%C %Z".to_string()),
            require: Some("AC".to_string()),
            upper: Some("Z".to_string()),
            zip: Some(r"[A-Z]\d{3}".to_string()),
            ..Default::default()
        })
    }

    #[test]
    fn test_required_blank_fails() {
        let metadata = metadata();
        for value in ["", "   ", "\t\n"] {
            let result = metadata.validate_field(FieldName::Address, value);
            assert!(!result.is_valid);
            assert_eq!(result.error.as_deref(), Some(REQUIRED_MESSAGE));
        }
        assert_eq!(
            metadata.validate_field(FieldName::Address, "123 Main St"),
            ValidationResult::valid()
        );
    }

    #[test]
    fn test_optional_blank_without_pattern_passes() {
        let metadata = metadata();
        assert!(metadata.validate_field(FieldName::Name, "").is_valid);
        assert!(metadata.validate_field(FieldName::Name, "  ").is_valid);
    }

    #[test]
    fn test_optional_blank_checked_against_pattern() {
        let metadata = metadata();
        assert!(!metadata.is_required(FieldName::PostalCode));

        let result = metadata.validate_field(FieldName::PostalCode, " ");
        assert!(!result.is_valid);
        assert_eq!(result.error.as_deref(), Some("Invalid Postal code format"));
    }

    #[test]
    fn test_pattern_checked_on_trimmed_value() {
        let metadata = metadata();
        assert!(metadata.validate_field(FieldName::PostalCode, " A123 ").is_valid);

        let result = metadata.validate_field(FieldName::PostalCode, "1234");
        assert!(!result.is_valid);
        assert_eq!(result.error.as_deref(), Some("Invalid Postal code format"));
    }

    #[test]
    fn test_unknown_field_is_permissive() {
        let metadata = metadata();
        assert!(metadata.validate_field(FieldName::SortingCode, "").is_valid);
        assert!(metadata.validate_field(FieldName::State, "anything").is_valid);
    }

    #[test]
    fn test_missing_error_message_uses_generic() {
        let mut metadata = metadata();
        if let Some(descriptor) = metadata.fields.get_mut(&FieldName::PostalCode) {
            descriptor.error_message = None;
        }
        let result = metadata.validate_field(FieldName::PostalCode, "nope");
        assert_eq!(result.error.as_deref(), Some(INVALID_FORMAT_MESSAGE));
    }

    #[test]
    fn test_transform_value() {
        let metadata = metadata();
        assert_eq!(
            metadata.transform_value(FieldName::PostalCode, Some("a123")),
            Some("A123".to_string())
        );
        assert_eq!(
            metadata.transform_value(FieldName::City, Some("springfield")),
            Some("springfield".to_string())
        );
        assert_eq!(metadata.transform_value(FieldName::PostalCode, None), None);
        assert_eq!(
            metadata.transform_value(FieldName::SortingCode, Some("x")),
            Some("x".to_string())
        );
    }

    #[test]
    fn test_result_serialization() {
        let json = serde_json::to_value(ValidationResult::invalid("bad")).unwrap();
        assert_eq!(json["isValid"], false);
        assert_eq!(json["error"], "bad");

        let json = serde_json::to_value(ValidationResult::valid()).unwrap();
        assert!(json.get("error").is_none());
    }
}
