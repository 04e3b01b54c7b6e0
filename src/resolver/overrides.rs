//! Static override table
//!
//! Hand-authored, network-free metadata per country plus a `DEFAULT` entry.
//! An override may describe a whole form or only correct one detail of the
//! dynamic record (a select for `state`, `has_postcode = false`, ...).

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use once_cell::sync::Lazy;

use super::builtin;
use super::merge::{metadata_for_country, metadata_from_default};
use crate::format::parse_required;
use crate::models::{CountryCode, FieldDescriptor, FieldName, LayoutRow, NormalizedMetadata};

/// Key of the fallback entry
pub const DEFAULT_KEY: &str = "DEFAULT";

/// A partial metadata record; unset parts defer to the other source
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StaticOverride {
    pub format: Option<String>,
    pub required: Option<Vec<FieldName>>,
    pub has_postcode: Option<bool>,
    pub fields: BTreeMap<FieldName, FieldDescriptor>,
    pub layout: Option<Vec<LayoutRow>>,
}

impl StaticOverride {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Required fields as service codes, e.g. `ACSZ`
    pub fn required(mut self, codes: &str) -> Self {
        self.required = Some(parse_required(Some(codes)));
        self
    }

    pub fn without_postcode(mut self) -> Self {
        self.has_postcode = Some(false);
        self
    }

    pub fn field(mut self, field: FieldName, descriptor: FieldDescriptor) -> Self {
        self.fields.insert(field, descriptor);
        self
    }

    pub fn layout(mut self, rows: Vec<LayoutRow>) -> Self {
        self.layout = Some(rows);
        self
    }
}

/// Read-only table of static overrides
///
/// Every entry is resolved against `DEFAULT` once, at construction.
#[derive(Debug)]
pub struct StaticOverrideTable {
    entries: HashMap<CountryCode, StaticOverride>,
    default_metadata: NormalizedMetadata,
    resolved: HashMap<CountryCode, NormalizedMetadata>,
}

static BUILTIN: Lazy<Arc<StaticOverrideTable>> = Lazy::new(|| {
    Arc::new(StaticOverrideTable::new(
        builtin::default_override(),
        builtin::country_overrides(),
    ))
});

impl StaticOverrideTable {
    pub fn new<C: Into<CountryCode>>(
        default: StaticOverride,
        entries: impl IntoIterator<Item = (C, StaticOverride)>,
    ) -> Self {
        let default_metadata = metadata_from_default(&default);
        let entries: HashMap<CountryCode, StaticOverride> = entries
            .into_iter()
            .map(|(code, entry)| (code.into(), entry))
            .filter(|(code, _)| !code.is_empty() && code.as_str() != DEFAULT_KEY)
            .collect();
        let resolved = entries
            .iter()
            .map(|(code, entry)| {
                (
                    code.clone(),
                    metadata_for_country(&default_metadata, entry),
                )
            })
            .collect();

        Self {
            entries,
            default_metadata,
            resolved,
        }
    }

    /// The built-in table, created on first use and shared afterwards
    pub fn builtin() -> Arc<Self> {
        Arc::clone(&BUILTIN)
    }

    /// The override for a country, if it has one
    pub fn get(&self, country: &CountryCode) -> Option<&StaticOverride> {
        self.entries.get(country)
    }

    /// Resolved static metadata; unknown and empty codes get `DEFAULT`
    pub fn resolve(&self, country: &CountryCode) -> &NormalizedMetadata {
        self.resolved.get(country).unwrap_or(&self.default_metadata)
    }

    pub fn default_metadata(&self) -> &NormalizedMetadata {
        &self.default_metadata
    }

    pub fn countries(&self) -> Vec<&CountryCode> {
        let mut countries: Vec<_> = self.entries.keys().collect();
        countries.sort();
        countries
    }
}
