//! Built-in override data

use super::overrides::StaticOverride;
use crate::models::{FieldDescriptor, FieldName, SelectOption, ValueTransform};

fn options(pairs: &[(&str, &str)]) -> Vec<SelectOption> {
    pairs
        .iter()
        .map(|(value, label)| SelectOption::new(*value, *label))
        .collect()
}

fn select(label: &str, pairs: &[(&str, &str)]) -> FieldDescriptor {
    FieldDescriptor::text(label)
        .with_placeholder(format!("Select {}", label.to_lowercase()))
        .with_options(options(pairs))
}

fn postcode(label: &str, example: &str, pattern: &str) -> FieldDescriptor {
    FieldDescriptor::text(label)
        .with_placeholder(example)
        .with_pattern(pattern, format!("Enter a valid {}", label.to_lowercase()))
}

const US_STATES: &[(&str, &str)] = &[
    ("AL", "Alabama"),
    ("AK", "Alaska"),
    ("AZ", "Arizona"),
    ("AR", "Arkansas"),
    ("CA", "California"),
    ("CO", "Colorado"),
    ("CT", "Connecticut"),
    ("DE", "Delaware"),
    ("DC", "District of Columbia"),
    ("FL", "Florida"),
    ("GA", "Georgia"),
    ("HI", "Hawaii"),
    ("ID", "Idaho"),
    ("IL", "Illinois"),
    ("IN", "Indiana"),
    ("IA", "Iowa"),
    ("KS", "Kansas"),
    ("KY", "Kentucky"),
    ("LA", "Louisiana"),
    ("ME", "Maine"),
    ("MD", "Maryland"),
    ("MA", "Massachusetts"),
    ("MI", "Michigan"),
    ("MN", "Minnesota"),
    ("MS", "Mississippi"),
    ("MO", "Missouri"),
    ("MT", "Montana"),
    ("NE", "Nebraska"),
    ("NV", "Nevada"),
    ("NH", "New Hampshire"),
    ("NJ", "New Jersey"),
    ("NM", "New Mexico"),
    ("NY", "New York"),
    ("NC", "North Carolina"),
    ("ND", "North Dakota"),
    ("OH", "Ohio"),
    ("OK", "Oklahoma"),
    ("OR", "Oregon"),
    ("PA", "Pennsylvania"),
    ("RI", "Rhode Island"),
    ("SC", "South Carolina"),
    ("SD", "South Dakota"),
    ("TN", "Tennessee"),
    ("TX", "Texas"),
    ("UT", "Utah"),
    ("VT", "Vermont"),
    ("VA", "Virginia"),
    ("WA", "Washington"),
    ("WV", "West Virginia"),
    ("WI", "Wisconsin"),
    ("WY", "Wyoming"),
];

const CA_PROVINCES: &[(&str, &str)] = &[
    ("AB", "Alberta"),
    ("BC", "British Columbia"),
    ("MB", "Manitoba"),
    ("NB", "New Brunswick"),
    ("NL", "Newfoundland and Labrador"),
    ("NS", "Nova Scotia"),
    ("NT", "Northwest Territories"),
    ("NU", "Nunavut"),
    ("ON", "Ontario"),
    ("PE", "Prince Edward Island"),
    ("QC", "Quebec"),
    ("SK", "Saskatchewan"),
    ("YT", "Yukon"),
];

const AU_STATES: &[(&str, &str)] = &[
    ("ACT", "Australian Capital Territory"),
    ("NSW", "New South Wales"),
    ("NT", "Northern Territory"),
    ("QLD", "Queensland"),
    ("SA", "South Australia"),
    ("TAS", "Tasmania"),
    ("VIC", "Victoria"),
    ("WA", "Western Australia"),
];

const HK_AREAS: &[(&str, &str)] = &[
    ("Hong Kong Island", "Hong Kong Island"),
    ("Kowloon", "Kowloon"),
    ("New Territories", "New Territories"),
];

pub(super) fn default_override() -> StaticOverride {
    StaticOverride::new()
        .format("%N%n%O%n%A%n%C %S %Z")
        .required("AC")
        .field(
            FieldName::Address,
            FieldDescriptor::text("Address").with_placeholder("Street address"),
        )
}

pub(super) fn country_overrides() -> Vec<(&'static str, StaticOverride)> {
    vec![
        (
            "US",
            StaticOverride::new()
                .format("%N%n%O%n%A%n%C, %S %Z")
                .required("ACSZ")
                .field(FieldName::State, select("State", US_STATES))
                .field(FieldName::PostalCode, postcode("ZIP code", "12345", r"\d{5}(?:-\d{4})?")),
        ),
        (
            "CA",
            StaticOverride::new()
                .format("%N%n%O%n%A%n%C %S %Z")
                .required("ACSZ")
                .field(FieldName::State, select("Province", CA_PROVINCES))
                .field(
                    FieldName::PostalCode,
                    postcode(
                        "Postal code",
                        "K1A 0B1",
                        r"(?i)[ABCEGHJ-NPRSTVXY]\d[ABCEGHJ-NPRSTV-Z] ?\d[ABCEGHJ-NPRSTV-Z]\d",
                    )
                    .with_transform(ValueTransform::Uppercase),
                ),
        ),
        (
            "AU",
            StaticOverride::new()
                .format("%O%n%N%n%A%n%C %S %Z")
                .required("ACSZ")
                .field(FieldName::City, FieldDescriptor::text("Suburb"))
                .field(FieldName::State, select("State", AU_STATES))
                .field(FieldName::PostalCode, postcode("Postcode", "2000", r"\d{4}")),
        ),
        (
            "GB",
            StaticOverride::new()
                .format("%N%n%O%n%A%n%C%n%Z")
                .required("ACZ")
                .field(FieldName::City, FieldDescriptor::text("Town/City"))
                .field(
                    FieldName::PostalCode,
                    postcode(
                        "Postcode",
                        "SW1A 1AA",
                        r"(?i)GIR ?0AA|[A-Z]{1,2}\d[A-Z\d]? ?\d[A-Z]{2}",
                    )
                    .with_transform(ValueTransform::Uppercase),
                ),
        ),
        (
            "IE",
            StaticOverride::new()
                .format("%N%n%O%n%A%n%D%n%C%n%S%n%Z")
                .required("AC")
                .field(FieldName::DependentLocality, FieldDescriptor::text("Locality"))
                .field(FieldName::State, FieldDescriptor::text("County"))
                .field(
                    FieldName::PostalCode,
                    postcode(
                        "Eircode",
                        "D02 X285",
                        r"(?i)(?:[AC-FHKNPRTV-Y]\d{2}|D6W) ?[\dAC-FHKNPRTV-Y]{4}",
                    )
                    .with_transform(ValueTransform::Uppercase),
                ),
        ),
        (
            "HK",
            StaticOverride::new()
                .format("%N%n%O%n%A%n%C%n%S")
                .required("AS")
                .without_postcode()
                .field(FieldName::City, FieldDescriptor::text("District"))
                .field(FieldName::State, select("Area", HK_AREAS)),
        ),
        // Postcodes are not used; everything else comes from the service.
        ("AE", StaticOverride::new().without_postcode()),
        (
            "DE",
            StaticOverride::new()
                .format("%N%n%O%n%A%n%Z %C")
                .required("ACZ")
                .field(FieldName::PostalCode, postcode("Postal code", "10115", r"\d{5}")),
        ),
        (
            "FR",
            StaticOverride::new()
                .format("%O%n%N%n%A%n%Z %C %X")
                .required("ACZ")
                .field(
                    FieldName::City,
                    FieldDescriptor::text("City").with_transform(ValueTransform::Uppercase),
                )
                .field(FieldName::PostalCode, postcode("Postal code", "75008", r"\d{2} ?\d{3}")),
        ),
        (
            "NL",
            StaticOverride::new()
                .format("%O%n%N%n%A%n%Z %C")
                .required("ACZ")
                .field(
                    FieldName::PostalCode,
                    postcode("Postcode", "1234 AB", r"(?i)\d{4} ?[A-Z]{2}")
                        .with_transform(ValueTransform::Uppercase),
                ),
        ),
        (
            "JP",
            StaticOverride::new()
                .format("〒%Z%n%S%n%C%n%A%n%O%n%N")
                .required("ASZ")
                .field(FieldName::State, FieldDescriptor::text("Prefecture"))
                .field(FieldName::PostalCode, postcode("Postal code", "154-0023", r"\d{3}-?\d{4}")),
        ),
        (
            "IN",
            StaticOverride::new()
                .format("%N%n%O%n%A%n%D%n%C %Z%n%S")
                .required("ACSZ")
                .field(FieldName::DependentLocality, FieldDescriptor::text("Locality"))
                .field(FieldName::PostalCode, postcode("PIN code", "110034", r"\d{6}")),
        ),
        (
            "BR",
            StaticOverride::new()
                .format("%O%n%N%n%A%n%D%n%C-%S%n%Z")
                .required("ASCZ")
                .field(FieldName::DependentLocality, FieldDescriptor::text("Neighborhood"))
                .field(
                    FieldName::State,
                    FieldDescriptor::text("State").with_transform(ValueTransform::Uppercase),
                )
                .field(FieldName::PostalCode, postcode("CEP", "40301-110", r"\d{5}-?\d{3}")),
        ),
    ]
}
