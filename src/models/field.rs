//! Field vocabulary and per-field descriptors
//!
//! Both metadata sources (the external address-format service and the static
//! override table) are translated into this vocabulary before they meet.

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// An address form field
///
/// The declaration order is the canonical order used for map keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldName {
    Address,
    City,
    State,
    PostalCode,
    SortingCode,
    DependentLocality,
    Organization,
    Name,
}

impl FieldName {
    /// Every field, in canonical order
    pub const ALL: [FieldName; 8] = [
        FieldName::Address,
        FieldName::City,
        FieldName::State,
        FieldName::PostalCode,
        FieldName::SortingCode,
        FieldName::DependentLocality,
        FieldName::Organization,
        FieldName::Name,
    ];

    /// Map a single-letter service code to a field.
    ///
    /// Codes are case-sensitive; anything outside `N O A C S Z X D` is `None`.
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'N' => Some(Self::Name),
            'O' => Some(Self::Organization),
            'A' => Some(Self::Address),
            'C' => Some(Self::City),
            'S' => Some(Self::State),
            'Z' => Some(Self::PostalCode),
            'X' => Some(Self::SortingCode),
            'D' => Some(Self::DependentLocality),
            _ => None,
        }
    }

    /// The single-letter service code for this field
    pub fn code(&self) -> char {
        match self {
            Self::Name => 'N',
            Self::Organization => 'O',
            Self::Address => 'A',
            Self::City => 'C',
            Self::State => 'S',
            Self::PostalCode => 'Z',
            Self::SortingCode => 'X',
            Self::DependentLocality => 'D',
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Address => "address",
            Self::City => "city",
            Self::State => "state",
            Self::PostalCode => "postal_code",
            Self::SortingCode => "sorting_code",
            Self::DependentLocality => "dependent_locality",
            Self::Organization => "organization",
            Self::Name => "name",
        }
    }

    /// Label used when no source supplies one
    pub fn default_label(&self) -> &'static str {
        match self {
            Self::Address => "Address",
            Self::City => "City",
            Self::State => "State",
            Self::PostalCode => "Postal code",
            Self::SortingCode => "Sorting code",
            Self::DependentLocality => "District",
            Self::Organization => "Organization",
            Self::Name => "Name",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown field name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown address field: {0}")]
pub struct UnknownFieldError(pub String);

impl FromStr for FieldName {
    type Err = UnknownFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        FieldName::ALL
            .into_iter()
            .find(|field| field.as_str() == trimmed)
            .ok_or_else(|| UnknownFieldError(trimmed.to_string()))
    }
}

/// Transform applied to a value before it is stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueTransform {
    Uppercase,
}

impl ValueTransform {
    pub fn apply(&self, value: &str) -> String {
        match self {
            Self::Uppercase => value.to_uppercase(),
        }
    }
}

/// A compiled validation pattern
///
/// The source is anchored on compilation so that the whole value has to match.
/// Equality and serialization use the source text.
#[derive(Clone)]
pub struct FieldPattern {
    source: String,
    regex: Regex,
}

impl FieldPattern {
    pub fn new(source: impl Into<String>) -> Result<Self, regex::Error> {
        let source = source.into();
        let regex = Regex::new(&format!("^(?:{})$", source))?;
        Ok(Self { source, regex })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

impl fmt::Debug for FieldPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FieldPattern").field(&self.source).finish()
    }
}

impl PartialEq for FieldPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for FieldPattern {}

impl Serialize for FieldPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.source)
    }
}

impl<'de> Deserialize<'de> for FieldPattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        FieldPattern::new(source).map_err(serde::de::Error::custom)
    }
}

/// One entry of a select field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Input kind of a field
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    #[default]
    Text,
    Select { options: Vec<SelectOption> },
}

impl FieldKind {
    pub fn is_select(&self) -> bool {
        matches!(self, Self::Select { .. })
    }

    /// Options of a select field, empty for free text
    pub fn options(&self) -> &[SelectOption] {
        match self {
            Self::Select { options } => options,
            Self::Text => &[],
        }
    }
}

/// Everything needed to render and validate one form input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    pub label: String,
    pub placeholder: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<ValueTransform>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<FieldPattern>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(default)]
    pub kind: FieldKind,
}

impl FieldDescriptor {
    /// Free-text descriptor with the given label and an `Enter <label>` placeholder
    pub fn text(label: impl Into<String>) -> Self {
        let label = label.into();
        let placeholder = format!("Enter {}", label.to_lowercase());
        Self {
            label,
            placeholder,
            transform: None,
            pattern: None,
            error_message: None,
            kind: FieldKind::Text,
        }
    }

    /// Descriptor built from the field's default label
    pub fn for_field(field: FieldName) -> Self {
        Self::text(field.default_label())
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_transform(mut self, transform: ValueTransform) -> Self {
        self.transform = Some(transform);
        self
    }

    /// Attach a validation pattern and its error message.
    ///
    /// An invalid pattern is logged and dropped; the field stays unvalidated.
    pub fn with_pattern(mut self, pattern: &str, error_message: impl Into<String>) -> Self {
        match FieldPattern::new(pattern) {
            Ok(compiled) => {
                self.pattern = Some(compiled);
                self.error_message = Some(error_message.into());
            }
            Err(e) => {
                tracing::warn!("Dropping invalid pattern for {}: {}", self.label, e);
            }
        }
        self
    }

    pub fn with_options(mut self, options: Vec<SelectOption>) -> Self {
        self.kind = FieldKind::Select { options };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_mapping_roundtrip() {
        for field in FieldName::ALL {
            assert_eq!(FieldName::from_code(field.code()), Some(field));
        }
        assert_eq!(FieldName::from_code('Y'), None);
        assert_eq!(FieldName::from_code('a'), None);
    }

    #[test]
    fn test_field_name_from_str() {
        assert_eq!("postal_code".parse::<FieldName>(), Ok(FieldName::PostalCode));
        assert_eq!(" city ".parse::<FieldName>(), Ok(FieldName::City));
        assert!("zip".parse::<FieldName>().is_err());
    }

    #[test]
    fn test_pattern_is_anchored() {
        let pattern = FieldPattern::new(r"\d{5}").unwrap();
        assert!(pattern.is_match("12345"));
        assert!(!pattern.is_match("123456"));
        assert!(!pattern.is_match("x12345"));
    }

    #[test]
    fn test_invalid_pattern_is_dropped() {
        let descriptor = FieldDescriptor::text("Postal code").with_pattern("(", "bad");
        assert!(descriptor.pattern.is_none());
        assert!(descriptor.error_message.is_none());
    }

    #[test]
    fn test_descriptor_serialization() {
        let descriptor = FieldDescriptor::text("State")
            .with_options(vec![SelectOption::new("CA", "California")]);
        let json = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(json["kind"]["type"], "select");
        assert_eq!(json["kind"]["options"][0]["value"], "CA");

        let parsed: FieldDescriptor = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, descriptor);
    }

    #[test]
    fn test_text_placeholder() {
        let descriptor = FieldDescriptor::for_field(FieldName::City);
        assert_eq!(descriptor.label, "City");
        assert_eq!(descriptor.placeholder, "Enter city");
        assert!(!descriptor.kind.is_select());
        assert!(descriptor.kind.options().is_empty());
    }
}
