//! Format decoding
//!
//! Pure parsers for the two compact encodings used by the address-format
//! service:
//! - the display format (`%N%n%O%n%A%n%C, %S %Z`), where `%n` is a line break
//! - the required-field codes (`ACSZ`)
//!
//! Both decode into ordered, duplicate-free [`FieldName`] lists.

pub mod layout;

use crate::models::FieldName;

pub use layout::build_layout;

const LINE_BREAK: &str = "%n";

/// Decode a display format into fields in first-occurrence order.
///
/// `%n` and unknown token letters are skipped; `None` and `""` give an empty list.
pub fn parse_format(format: Option<&str>) -> Vec<FieldName> {
    let mut fields = Vec::new();
    let Some(format) = format else {
        return fields;
    };

    let mut chars = format.chars();
    while let Some(c) = chars.next() {
        if c != '%' {
            continue;
        }
        let Some(token) = chars.next() else {
            break;
        };
        if let Some(field) = FieldName::from_code(token) {
            if !fields.contains(&field) {
                fields.push(field);
            }
        }
    }

    fields
}

/// Decode a required-field code string (`ACZ`), deduplicated and in order
pub fn parse_required(codes: Option<&str>) -> Vec<FieldName> {
    let mut fields = Vec::new();
    for field in codes.unwrap_or_default().chars().filter_map(FieldName::from_code) {
        if !fields.contains(&field) {
            fields.push(field);
        }
    }
    fields
}

/// `ordered - required` as a set difference, keeping `ordered`'s order
pub fn optional_fields(ordered: &[FieldName], required: &[FieldName]) -> Vec<FieldName> {
    ordered
        .iter()
        .filter(|field| !required.contains(field))
        .copied()
        .collect()
}

/// Remove every token for `field` from a format, dropping lines left empty
pub fn strip_field(format: &str, field: FieldName) -> String {
    let token = format!("%{}", field.code());
    format
        .split(LINE_BREAK)
        .map(|line| line.replace(&token, ""))
        .map(|line| line.trim().trim_end_matches(',').trim().to_string())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(LINE_BREAK)
}

/// Append `field` on its own line unless the format already contains it
pub fn append_field(format: &str, field: FieldName) -> String {
    if parse_format(Some(format)).contains(&field) {
        return format.to_string();
    }
    let token = format!("%{}", field.code());
    if format.is_empty() {
        token
    } else {
        format!("{}{}{}", format, LINE_BREAK, token)
    }
}
