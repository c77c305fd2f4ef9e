// ============================================================
// HEADER SCHEMA
// ============================================================
// Expected header labels, one per column index. The empty string is the
// "don't care" marker: that position passes validation with any content.

use serde::{Deserialize, Serialize};

use super::sheet::column_letter;

/// The full 29-column ratesheet header layout.
///
/// "Charging interval" legitimately repeats; consumers must never key
/// columns by label alone.
pub const RATESHEET_HEADERS: &[&str] = &[
    "BU PLMN Code",
    "TADIG PLMN Code",
    "Start date",
    "End date",
    "Currency",
    "MOC Local Call Rate/Value",
    "Charging interval",
    "MOC Call Back Home Rate/Value",
    "Charging interval",
    "MOC Rest of the world Rate/Value",
    "Charging interval",
    "MOC Premium numbers Rate/Value",
    "Charging interval",
    "MOC Special numbers Rate/Value",
    "Charging interval",
    "MOC Satellite Rate/Value",
    "Charging interval",
    "MTC Call Rate/Value",
    "Charging interval",
    "MO-SMS Rate/Value",
    "GPRS Rate MB Rate/Value",
    "GPRS Rate per KB Rate/Value",
    "Charging interval",
    "VoLTE Rate MB Rate/Value",
    "Charging interval",
    "Tax applicable Yes/No",
    "Tax applicable Tax Value",
    "Tax included in the rate Yes/No",
    "Bearer Service included in Special IOT Yes/No",
];

/// How many leading columns the basic identity check covers
const CORE_HEADER_COUNT: usize = 5;

/// Expected header labels for one sheet layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Identifying name for diagnostics
    pub name: String,

    /// One label per column index; empty string means "any value accepted"
    pub labels: Vec<String>,
}

impl Schema {
    /// Create a schema from explicit labels
    pub fn new(name: impl Into<String>, labels: Vec<String>) -> Self {
        Self {
            name: name.into(),
            labels,
        }
    }

    /// The full 29-column ratesheet layout
    pub fn ratesheet() -> Self {
        Self::new(
            "ratesheet",
            RATESHEET_HEADERS.iter().map(|s| s.to_string()).collect(),
        )
    }

    /// The 5-column identity prefix (PLMN codes, validity dates, currency)
    pub fn ratesheet_core() -> Self {
        Self::new(
            "ratesheet-core",
            RATESHEET_HEADERS[..CORE_HEADER_COUNT]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        )
    }

    /// Number of columns the schema describes
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the schema describes no columns at all
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Positions that participate in validation, with their expected labels
    pub fn constrained(&self) -> impl Iterator<Item = (usize, &str)> {
        self.labels
            .iter()
            .enumerate()
            .filter(|(_, label)| !label.is_empty())
            .map(|(i, label)| (i, label.as_str()))
    }

    /// Label a column binds to during extraction.
    ///
    /// Don't-care positions and columns past the schema's width bind to
    /// their spreadsheet column letter.
    pub fn bound_label(&self, index: usize) -> String {
        match self.labels.get(index) {
            Some(label) if !label.is_empty() => label.clone(),
            _ => column_letter(index),
        }
    }
}
