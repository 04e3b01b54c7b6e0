//! Country codes and the display-name lookup table

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// ISO 3166-1 alpha-2 country code, normalized to uppercase
///
/// Any string converts into a `CountryCode`; empty and unknown codes are
/// ordinary values that resolve to the default metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CountryCode(String);

impl CountryCode {
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Two ASCII letters
    pub fn is_well_formed(&self) -> bool {
        self.0.len() == 2 && self.0.bytes().all(|b| b.is_ascii_uppercase())
    }
}

impl From<&str> for CountryCode {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for CountryCode {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<CountryCode> for String {
    fn from(value: CountryCode) -> Self {
        value.0
    }
}

impl AsRef<str> for CountryCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

const COUNTRY_NAMES: &[(&str, &str)] = &[
    ("Argentina", "AR"),
    ("Australia", "AU"),
    ("Austria", "AT"),
    ("Belgium", "BE"),
    ("Brazil", "BR"),
    ("Bulgaria", "BG"),
    ("Canada", "CA"),
    ("Chile", "CL"),
    ("China", "CN"),
    ("Colombia", "CO"),
    ("Croatia", "HR"),
    ("Cyprus", "CY"),
    ("Czech Republic", "CZ"),
    ("Czechia", "CZ"),
    ("Denmark", "DK"),
    ("Egypt", "EG"),
    ("Estonia", "EE"),
    ("Finland", "FI"),
    ("France", "FR"),
    ("Germany", "DE"),
    ("Greece", "GR"),
    ("Hong Kong", "HK"),
    ("Hungary", "HU"),
    ("Iceland", "IS"),
    ("India", "IN"),
    ("Indonesia", "ID"),
    ("Ireland", "IE"),
    ("Israel", "IL"),
    ("Italy", "IT"),
    ("Japan", "JP"),
    ("Latvia", "LV"),
    ("Lithuania", "LT"),
    ("Luxembourg", "LU"),
    ("Malaysia", "MY"),
    ("Malta", "MT"),
    ("Mexico", "MX"),
    ("Netherlands", "NL"),
    ("New Zealand", "NZ"),
    ("Nigeria", "NG"),
    ("Norway", "NO"),
    ("Peru", "PE"),
    ("Philippines", "PH"),
    ("Poland", "PL"),
    ("Portugal", "PT"),
    ("Romania", "RO"),
    ("Saudi Arabia", "SA"),
    ("Singapore", "SG"),
    ("Slovakia", "SK"),
    ("Slovenia", "SI"),
    ("South Africa", "ZA"),
    ("South Korea", "KR"),
    ("Spain", "ES"),
    ("Sweden", "SE"),
    ("Switzerland", "CH"),
    ("Taiwan", "TW"),
    ("Thailand", "TH"),
    ("Turkey", "TR"),
    ("Ukraine", "UA"),
    ("United Arab Emirates", "AE"),
    ("United Kingdom", "GB"),
    ("United States", "US"),
    ("United States of America", "US"),
    ("Vietnam", "VN"),
];

static NAME_INDEX: Lazy<HashMap<String, &'static str>> = Lazy::new(|| {
    COUNTRY_NAMES
        .iter()
        .map(|(name, code)| (name.to_ascii_lowercase(), *code))
        .collect()
});

/// Look up the ISO code for a country display name.
///
/// Matches whole names only, ignoring surrounding whitespace and ASCII case.
pub fn country_code_from_name(name: &str) -> Option<&'static str> {
    NAME_INDEX.get(&name.trim().to_ascii_lowercase()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_code_normalization() {
        assert_eq!(CountryCode::new(" us ").as_str(), "US");
        assert!(CountryCode::new("").is_empty());
        assert!(CountryCode::new("gb").is_well_formed());
        assert!(!CountryCode::new("GBR").is_well_formed());
        assert!(!CountryCode::new("../").is_well_formed());
    }

    #[test]
    fn test_country_code_serde() {
        let code: CountryCode = serde_json::from_str("\"de\"").unwrap();
        assert_eq!(code.as_str(), "DE");
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"DE\"");
    }

    #[test]
    fn test_country_code_from_name() {
        assert_eq!(country_code_from_name("United Kingdom"), Some("GB"));
        assert_eq!(country_code_from_name("  germany "), Some("DE"));
        assert_eq!(country_code_from_name("United States of America"), Some("US"));
        assert_eq!(country_code_from_name("Nowhereland"), None);
        assert_eq!(country_code_from_name("United"), None);
    }
}
