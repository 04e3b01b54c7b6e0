//! Raw record normalization
//!
//! Turns a [`RawExternalRecord`] into [`NormalizedMetadata`] using the format
//! decoder plus the service's naming conventions.

use std::collections::BTreeMap;

use crate::format::{build_layout, optional_fields, parse_format, parse_required};
use crate::models::{FieldDescriptor, FieldName, NormalizedMetadata, ValueTransform};
use crate::source::RawExternalRecord;

/// Format the service applies to countries without their own `fmt`
pub const SERVICE_DEFAULT_FORMAT: &str = "%N%n%O%n%A%n%C";

/// Required codes the service applies to countries without their own `require`
pub const SERVICE_DEFAULT_REQUIRED: &str = "AC";

/// Build normalized metadata from a raw service record
pub fn normalize_record(raw: &RawExternalRecord) -> NormalizedMetadata {
    let format = raw
        .fmt
        .clone()
        .unwrap_or_else(|| SERVICE_DEFAULT_FORMAT.to_string());
    let ordered = parse_format(Some(&format));

    let required: Vec<FieldName> =
        parse_required(Some(raw.require.as_deref().unwrap_or(SERVICE_DEFAULT_REQUIRED)))
            .into_iter()
            .filter(|field| ordered.contains(field))
            .collect();
    let optional = optional_fields(&ordered, &required);
    let upper = parse_required(raw.upper.as_deref());

    let fields: BTreeMap<FieldName, FieldDescriptor> = ordered
        .iter()
        .map(|field| (*field, describe(*field, raw, upper.contains(field))))
        .collect();

    NormalizedMetadata {
        format,
        has_postcode: ordered.contains(&FieldName::PostalCode),
        layout: build_layout(&ordered),
        required,
        optional,
        fields,
    }
}

fn describe(field: FieldName, raw: &RawExternalRecord, uppercase: bool) -> FieldDescriptor {
    let label = label_for(field, raw);
    let mut descriptor = FieldDescriptor::text(label.clone());

    if field == FieldName::PostalCode {
        if let Some(example) = first_example(raw.zipex.as_deref()) {
            descriptor = descriptor.with_placeholder(example);
        }
        if let Some(pattern) = raw.zip.as_deref().filter(|p| !p.is_empty()) {
            descriptor = descriptor.with_pattern(pattern, format!("Invalid {} format", label));
        }
    }

    if uppercase {
        descriptor = descriptor.with_transform(ValueTransform::Uppercase);
    }

    descriptor
}

fn label_for(field: FieldName, raw: &RawExternalRecord) -> String {
    let name_type = match field {
        FieldName::PostalCode => raw.zip_name_type.as_deref(),
        FieldName::State => raw.state_name_type.as_deref(),
        FieldName::City => raw.locality_name_type.as_deref(),
        FieldName::DependentLocality => raw.sublocality_name_type.as_deref(),
        _ => None,
    };

    match name_type.map(str::trim).filter(|name| !name.is_empty()) {
        Some("zip") => "ZIP code".to_string(),
        Some("postal") => "Postal code".to_string(),
        Some("pin") => "PIN code".to_string(),
        Some("eircode") => "Eircode".to_string(),
        Some(other) => humanize(other),
        None => field.default_label().to_string(),
    }
}

/// `post_town` -> `Post town`
fn humanize(name_type: &str) -> String {
    let spaced = name_type.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn first_example(zipex: Option<&str>) -> Option<&str> {
    zipex?
        .split(',')
        .map(str::trim)
        .find(|example| !example.is_empty())
}
