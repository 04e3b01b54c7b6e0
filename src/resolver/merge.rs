//! Merging a static override into a metadata record
//!
//! Precedence, per field:
//! - a descriptor defined by the override replaces the base descriptor
//! - fields only in the base are kept, with their descriptor and required
//!   status, and stay in the format even when the override replaces it
//! - fields only in the override join the field set (and the format)
//!
//! `format` and `required` come from the override when it defines them.
//! `has_postcode` always reflects the merged field set.

use std::collections::BTreeMap;

use super::overrides::StaticOverride;
use crate::fetch::normalize::{SERVICE_DEFAULT_FORMAT, SERVICE_DEFAULT_REQUIRED};
use crate::format::{
    append_field, build_layout, optional_fields, parse_format, parse_required, strip_field,
};
use crate::models::{FieldDescriptor, FieldName, LayoutRow, NormalizedMetadata};

/// Resolve the `DEFAULT` override on its own
pub fn metadata_from_default(default: &StaticOverride) -> NormalizedMetadata {
    let format = default
        .format
        .clone()
        .unwrap_or_else(|| SERVICE_DEFAULT_FORMAT.to_string());
    let ordered = parse_format(Some(&format));
    let required: Vec<FieldName> = default
        .required
        .clone()
        .unwrap_or_else(|| parse_required(Some(SERVICE_DEFAULT_REQUIRED)));

    let base = NormalizedMetadata {
        has_postcode: ordered.contains(&FieldName::PostalCode),
        optional: optional_fields(&ordered, &required),
        fields: ordered
            .iter()
            .map(|field| (*field, FieldDescriptor::for_field(*field)))
            .collect(),
        layout: build_layout(&ordered),
        required,
        format,
    };

    merge_with_override(base, default)
}

/// Resolve a country override on top of the resolved `DEFAULT`.
///
/// An override with its own format describes the whole form, so `DEFAULT`
/// only contributes descriptors for the fields that format names.
pub fn metadata_for_country(
    default: &NormalizedMetadata,
    over: &StaticOverride,
) -> NormalizedMetadata {
    let Some(format) = &over.format else {
        return merge_with_override(default.clone(), over);
    };

    let ordered = parse_format(Some(format));
    let required: Vec<FieldName> = default
        .required
        .iter()
        .filter(|field| ordered.contains(field))
        .copied()
        .collect();
    let base = NormalizedMetadata {
        format: format.clone(),
        optional: optional_fields(&ordered, &required),
        required,
        has_postcode: ordered.contains(&FieldName::PostalCode),
        fields: ordered
            .iter()
            .map(|field| {
                let descriptor = default
                    .fields
                    .get(field)
                    .cloned()
                    .unwrap_or_else(|| FieldDescriptor::for_field(*field));
                (*field, descriptor)
            })
            .collect(),
        layout: build_layout(&ordered),
    };

    merge_with_override(base, over)
}

/// Apply `over` on top of `base`
pub fn merge_with_override(base: NormalizedMetadata, over: &StaticOverride) -> NormalizedMetadata {
    let mut format = over.format.clone().unwrap_or_else(|| base.format.clone());

    let base_ordered = parse_format(Some(&base.format));
    let override_ordered = parse_format(Some(&format));
    let base_only: Vec<FieldName> = base_ordered
        .iter()
        .filter(|field| !override_ordered.contains(field))
        .copied()
        .collect();
    for field in &base_only {
        format = append_field(&format, *field);
    }

    let drops_postcode = over.has_postcode == Some(false);
    if drops_postcode {
        format = strip_field(&format, FieldName::PostalCode);
    } else if over.has_postcode == Some(true) {
        format = append_field(&format, FieldName::PostalCode);
    }

    for field in over.fields.keys() {
        if drops_postcode && *field == FieldName::PostalCode {
            continue;
        }
        format = append_field(&format, *field);
    }

    let ordered = parse_format(Some(&format));

    let mut required: Vec<FieldName> = over
        .required
        .as_ref()
        .unwrap_or(&base.required)
        .iter()
        .filter(|field| ordered.contains(field))
        .copied()
        .collect();
    for field in &base_only {
        if base.required.contains(field) && ordered.contains(field) && !required.contains(field) {
            required.push(*field);
        }
    }
    let optional = optional_fields(&ordered, &required);

    let mut base_fields = base.fields;
    let fields: BTreeMap<FieldName, FieldDescriptor> = ordered
        .iter()
        .map(|field| {
            let descriptor = over
                .fields
                .get(field)
                .cloned()
                .or_else(|| base_fields.remove(field))
                .unwrap_or_else(|| FieldDescriptor::for_field(*field));
            (*field, descriptor)
        })
        .collect();

    let layout = match &over.layout {
        Some(rows) => restrict_layout(rows, &ordered),
        None if same_fields(&base.format, &ordered) => restrict_layout(&base.layout, &ordered),
        None => build_layout(&ordered),
    };

    NormalizedMetadata {
        format,
        required,
        optional,
        has_postcode: ordered.contains(&FieldName::PostalCode),
        fields,
        layout,
    }
}

fn same_fields(format: &str, ordered: &[FieldName]) -> bool {
    parse_format(Some(format)) == ordered
}

/// Drop cells for fields outside the set, and rows left empty
fn restrict_layout(rows: &[LayoutRow], fields: &[FieldName]) -> Vec<LayoutRow> {
    rows.iter()
        .map(|row| {
            LayoutRow(
                row.cells()
                    .iter()
                    .filter(|cell| fields.contains(&cell.field))
                    .copied()
                    .collect(),
            )
        })
        .filter(|row| !row.cells().is_empty())
        .collect()
}
