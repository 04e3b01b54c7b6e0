//! Format decoder tests

use address_metadata::format::{build_layout, optional_fields, strip_field};
use address_metadata::{FieldName, parse_format, parse_required};

use FieldName::*;

mod parse_format_tests {
    use super::*;

    #[test]
    fn test_us_format_order() {
        let fields = parse_format(Some("%N%n%O%n%A%n%C, %S %Z"));
        assert_eq!(
            fields,
            vec![Name, Organization, Address, City, State, PostalCode]
        );
    }

    #[test]
    fn test_missing_or_empty_format() {
        assert!(parse_format(None).is_empty());
        assert!(parse_format(Some("")).is_empty());
    }

    #[test]
    fn test_newline_token_and_literals_skipped() {
        let fields = parse_format(Some("〒%Z%n%S%C%n%A%n%O%n%N"));
        assert_eq!(
            fields,
            vec![PostalCode, State, City, Address, Organization, Name]
        );
    }

    #[test]
    fn test_unknown_codes_ignored() {
        let fields = parse_format(Some("%A%n%Q%C%n%%%X"));
        assert_eq!(fields, vec![Address, City, SortingCode]);
    }

    #[test]
    fn test_duplicates_keep_first_position() {
        let fields = parse_format(Some("%C %Z%n%A%n%C"));
        assert_eq!(fields, vec![City, PostalCode, Address]);
    }

    #[test]
    fn test_trailing_percent_ignored() {
        assert_eq!(parse_format(Some("%A%n%C%")), vec![Address, City]);
    }
}

mod parse_required_tests {
    use super::*;

    #[test]
    fn test_required_codes() {
        assert_eq!(
            parse_required(Some("ACSZ")),
            vec![Address, City, State, PostalCode]
        );
    }

    #[test]
    fn test_missing_required() {
        assert!(parse_required(None).is_empty());
        assert!(parse_required(Some("")).is_empty());
    }

    #[test]
    fn test_unknown_required_codes_ignored() {
        assert_eq!(parse_required(Some("AQ1C")), vec![Address, City]);
    }

    #[test]
    fn test_optional_fields_exclude_required() {
        let ordered = parse_format(Some("%N%n%O%n%A%n%C, %S %Z"));
        let required = parse_required(Some("ACSZ"));
        assert_eq!(optional_fields(&ordered, &required), vec![Name, Organization]);
    }
}

mod edit_tests {
    use super::*;

    #[test]
    fn test_strip_postcode_from_shared_line() {
        assert_eq!(
            strip_field("%N%n%O%n%A%n%C %S %Z", PostalCode),
            "%N%n%O%n%A%n%C %S"
        );
    }

    #[test]
    fn test_strip_postcode_line() {
        assert_eq!(strip_field("%N%n%A%n%C%n%Z", PostalCode), "%N%n%A%n%C");
    }
}

mod layout_tests {
    use super::*;

    #[test]
    fn test_full_locality_row() {
        let layout = build_layout(&[Name, Address, City, State, PostalCode]);
        assert_eq!(layout.len(), 2);
        assert_eq!(layout[0].fields().collect::<Vec<_>>(), vec![Address]);
        assert_eq!(
            layout[1].cells().iter().map(|c| c.span).collect::<Vec<_>>(),
            vec![6, 3, 3]
        );
    }

    #[test]
    fn test_every_row_fits_grid() {
        for fields in [
            vec![Address, City],
            vec![Address, City, PostalCode],
            vec![Address, DependentLocality, City, State, PostalCode],
        ] {
            for row in build_layout(&fields) {
                assert_eq!(row.total_span(), 12);
            }
        }
    }
}
