// ============================================================
// VALIDATION VERDICT
// ============================================================
// Structured outcome of header validation. A failed check is a value,
// not an error; callers branch on it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One header cell that did not match its expected label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderMismatch {
    /// Spreadsheet reference of the offending cell, e.g. "B4"
    pub cell: String,

    /// Label the schema expected at that position
    pub expected: String,

    /// Normalized content actually found there
    pub actual: String,
}

impl fmt::Display for HeaderMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: expected '{}', found '{}'",
            self.cell, self.expected, self.actual
        )
    }
}

/// Outcome of matching a header row against a schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationVerdict {
    Valid,
    Invalid(Vec<HeaderMismatch>),
}

impl ValidationVerdict {
    /// Build a verdict from collected mismatches; empty means valid
    pub fn from_mismatches(mismatches: Vec<HeaderMismatch>) -> Self {
        if mismatches.is_empty() {
            ValidationVerdict::Valid
        } else {
            ValidationVerdict::Invalid(mismatches)
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationVerdict::Valid)
    }

    /// The mismatch list; empty for a valid verdict
    pub fn mismatches(&self) -> &[HeaderMismatch] {
        match self {
            ValidationVerdict::Valid => &[],
            ValidationVerdict::Invalid(mismatches) => mismatches,
        }
    }
}
