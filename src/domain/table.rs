// ============================================================
// EXTRACTED TABLE
// ============================================================
// The normalized data region after a successful validation pass.
// Storage is positional: the ratesheet layout repeats labels, so a
// label-keyed map would silently drop columns.

use serde::{Deserialize, Serialize};

/// A rectangular table of normalized strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedTable {
    /// Bound column labels, order preserved, duplicates legal
    pub columns: Vec<String>,

    /// Data records, each aligned to `columns` by position
    pub records: Vec<Vec<String>>,
}

impl ExtractedTable {
    /// Create a table, aligning every record to the column count
    pub fn new(columns: Vec<String>, mut records: Vec<Vec<String>>) -> Self {
        let width = columns.len();
        for record in &mut records {
            record.resize(width, String::new());
        }
        Self { columns, records }
    }

    /// Number of data records
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Whether the table holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Value at (record, label), first matching column wins.
    ///
    /// Convenience for callers that know the label is unique; duplicated
    /// labels must be addressed by position instead.
    pub fn value(&self, record_index: usize, label: &str) -> Option<&str> {
        let column = self.columns.iter().position(|c| c == label)?;
        self.records
            .get(record_index)?
            .get(column)
            .map(|v| v.as_str())
    }
}
