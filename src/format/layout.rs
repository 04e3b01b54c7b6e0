//! Mechanical layout generation for a 12-unit grid

use crate::models::{FieldName, LayoutCell, LayoutRow};

const LOCALITY_ROW: [FieldName; 3] = [FieldName::City, FieldName::State, FieldName::PostalCode];

/// Build layout rows for a field set.
///
/// - `address` gets its own full-width row
/// - `city`, `state` and `postal_code` share one row (6/3/3, 6/6 or 12)
/// - `dependent_locality` gets a full-width row after the locality row
///
/// Other fields are not laid out.
pub fn build_layout(fields: &[FieldName]) -> Vec<LayoutRow> {
    let mut rows = Vec::new();

    if fields.contains(&FieldName::Address) {
        rows.push(LayoutRow::full_width(FieldName::Address));
    }

    let locality: Vec<FieldName> = LOCALITY_ROW
        .into_iter()
        .filter(|field| fields.contains(field))
        .collect();
    let spans: &[u8] = match locality.len() {
        3 => &[6, 3, 3],
        2 => &[6, 6],
        _ => &[12],
    };
    if !locality.is_empty() {
        rows.push(LayoutRow(
            locality
                .iter()
                .zip(spans)
                .map(|(field, span)| LayoutCell::new(*field, *span))
                .collect(),
        ));
    }

    if fields.contains(&FieldName::DependentLocality) {
        rows.push(LayoutRow::full_width(FieldName::DependentLocality));
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use FieldName::*;

    #[test]
    fn test_full_layout() {
        let rows = build_layout(&[Name, DependentLocality, PostalCode, State, City, Address]);
        assert_eq!(
            rows,
            vec![
                LayoutRow::full_width(Address),
                LayoutRow(vec![
                    LayoutCell::new(City, 6),
                    LayoutCell::new(State, 3),
                    LayoutCell::new(PostalCode, 3),
                ]),
                LayoutRow::full_width(DependentLocality),
            ]
        );
        assert!(rows.iter().all(|row| row.total_span() == 12));
    }

    #[test]
    fn test_two_locality_fields_split_evenly() {
        let rows = build_layout(&[Address, City, PostalCode]);
        assert_eq!(
            rows[1],
            LayoutRow(vec![LayoutCell::new(City, 6), LayoutCell::new(PostalCode, 6)])
        );
    }

    #[test]
    fn test_single_locality_field_is_full_width() {
        let rows = build_layout(&[City]);
        assert_eq!(rows, vec![LayoutRow::full_width(City)]);
    }

    #[test]
    fn test_empty_layout() {
        assert!(build_layout(&[]).is_empty());
        assert!(build_layout(&[Name, Organization]).is_empty());
    }
}
