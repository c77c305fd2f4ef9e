// ============================================================
// COUNTRY LOOKUP
// ============================================================
// Collaborator interface for PLMN-prefix country enrichment. The real
// relational service lives outside this crate; tests and demos use the
// in-memory table.

use std::collections::HashMap;

/// Outcome of a single prefix lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// The prefix resolved to a country name
    Found(String),

    /// The service answered but knows no such prefix
    Unknown,

    /// The service itself failed to answer
    Failed,
}

/// Resolves a TADIG country prefix (first three characters of a TADIG
/// PLMN code) to a country name
pub trait CountryLookup: Send + Sync {
    fn country_name(&self, code: &str) -> LookupOutcome;
}

/// Fixed in-memory lookup table
#[derive(Debug, Clone, Default)]
pub struct InMemoryCountryLookup {
    entries: HashMap<String, String>,
}

impl InMemoryCountryLookup {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Add one prefix -> country mapping
    pub fn with_entry(mut self, code: impl Into<String>, country: impl Into<String>) -> Self {
        self.entries.insert(code.into(), country.into());
        self
    }
}

impl CountryLookup for InMemoryCountryLookup {
    fn country_name(&self, code: &str) -> LookupOutcome {
        match self.entries.get(code) {
            Some(country) => LookupOutcome::Found(country.clone()),
            None => LookupOutcome::Unknown,
        }
    }
}
