//! Normalized address metadata
//!
//! The unit of exchange between the fetcher, the resolver and form callers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::field::{FieldDescriptor, FieldName};
use crate::format::parse_format;

/// One cell of a layout row on a 12-unit grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutCell {
    pub field: FieldName,
    pub span: u8,
}

impl LayoutCell {
    pub fn new(field: FieldName, span: u8) -> Self {
        Self { field, span }
    }
}

/// One horizontal slice of the form grid
///
/// Spans conventionally sum to 12; nothing enforces it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayoutRow(pub Vec<LayoutCell>);

impl LayoutRow {
    pub fn full_width(field: FieldName) -> Self {
        Self(vec![LayoutCell::new(field, 12)])
    }

    pub fn cells(&self) -> &[LayoutCell] {
        &self.0
    }

    pub fn fields(&self) -> impl Iterator<Item = FieldName> + '_ {
        self.0.iter().map(|cell| cell.field)
    }

    pub fn total_span(&self) -> u32 {
        self.0.iter().map(|cell| u32::from(cell.span)).sum()
    }
}

/// Merge-resolved description of one country's address form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedMetadata {
    /// Display format in the service mini-language (`%A%n%C %S %Z`)
    pub format: String,
    pub required: Vec<FieldName>,
    pub optional: Vec<FieldName>,
    pub has_postcode: bool,
    pub fields: BTreeMap<FieldName, FieldDescriptor>,
    pub layout: Vec<LayoutRow>,
}

/// A broken [`NormalizedMetadata`] invariant
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("Field {0} is both required and optional")]
    RequiredAndOptional(FieldName),
    #[error("Layout references {0} which has no descriptor")]
    LayoutWithoutDescriptor(FieldName),
    #[error("Field sets do not match the format: expected {expected:?}, found {found:?}")]
    FormatMismatch {
        expected: Vec<FieldName>,
        found: Vec<FieldName>,
    },
    #[error("hasPostcode is {0} but postal_code presence disagrees")]
    PostcodeFlag(bool),
}

impl NormalizedMetadata {
    /// Required field membership; `false` for fields absent from the record
    pub fn is_required(&self, field: FieldName) -> bool {
        self.required.contains(&field)
    }

    /// Optional field membership; `false` for fields absent from the record
    pub fn is_optional(&self, field: FieldName) -> bool {
        self.optional.contains(&field)
    }

    /// Required fields followed by optional ones
    pub fn all_fields(&self) -> Vec<FieldName> {
        let mut all = self.required.clone();
        for field in &self.optional {
            if !all.contains(field) {
                all.push(*field);
            }
        }
        all
    }

    pub fn descriptor(&self, field: FieldName) -> Option<&FieldDescriptor> {
        self.fields.get(&field)
    }

    /// Check the structural invariants every produced record must satisfy
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        if let Some(field) = self.required.iter().find(|f| self.optional.contains(f)) {
            return Err(InvariantViolation::RequiredAndOptional(*field));
        }

        for row in &self.layout {
            if let Some(field) = row.fields().find(|f| !self.fields.contains_key(f)) {
                return Err(InvariantViolation::LayoutWithoutDescriptor(field));
            }
        }

        let mut expected = parse_format(Some(&self.format));
        let mut found = self.all_fields();
        expected.sort();
        found.sort();
        if expected != found {
            return Err(InvariantViolation::FormatMismatch { expected, found });
        }

        if self.has_postcode != found.contains(&FieldName::PostalCode) {
            return Err(InvariantViolation::PostcodeFlag(self.has_postcode));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NormalizedMetadata {
        let mut fields = BTreeMap::new();
        fields.insert(FieldName::Address, FieldDescriptor::for_field(FieldName::Address));
        fields.insert(FieldName::City, FieldDescriptor::for_field(FieldName::City));
        fields.insert(FieldName::PostalCode, FieldDescriptor::for_field(FieldName::PostalCode));
        NormalizedMetadata {
            format: "%A%n%C %Z".to_string(),
            required: vec![FieldName::Address, FieldName::City],
            optional: vec![FieldName::PostalCode],
            has_postcode: true,
            fields,
            layout: vec![
                LayoutRow::full_width(FieldName::Address),
                LayoutRow(vec![
                    LayoutCell::new(FieldName::City, 6),
                    LayoutCell::new(FieldName::PostalCode, 6),
                ]),
            ],
        }
    }

    #[test]
    fn test_membership() {
        let metadata = sample();
        assert!(metadata.is_required(FieldName::Address));
        assert!(!metadata.is_optional(FieldName::Address));
        assert!(metadata.is_optional(FieldName::PostalCode));
        assert!(!metadata.is_required(FieldName::State));
        assert!(!metadata.is_optional(FieldName::State));
    }

    #[test]
    fn test_all_fields_required_first() {
        assert_eq!(
            sample().all_fields(),
            vec![FieldName::Address, FieldName::City, FieldName::PostalCode]
        );
    }

    #[test]
    fn test_invariants_hold() {
        assert_eq!(sample().check_invariants(), Ok(()));
    }

    #[test]
    fn test_invariant_violations() {
        let mut overlapping = sample();
        overlapping.optional.push(FieldName::City);
        assert_eq!(
            overlapping.check_invariants(),
            Err(InvariantViolation::RequiredAndOptional(FieldName::City))
        );

        let mut dangling = sample();
        dangling.layout.push(LayoutRow::full_width(FieldName::State));
        assert!(matches!(
            dangling.check_invariants(),
            Err(InvariantViolation::LayoutWithoutDescriptor(FieldName::State))
        ));

        let mut mismatched = sample();
        mismatched.format = "%A%n%C".to_string();
        assert!(matches!(
            mismatched.check_invariants(),
            Err(InvariantViolation::FormatMismatch { .. })
        ));
    }

    #[test]
    fn test_serialization_uses_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["hasPostcode"], true);
        assert_eq!(json["required"][0], "address");
        assert_eq!(json["layout"][1][0]["span"], 6);
    }
}
