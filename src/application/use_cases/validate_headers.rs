// Header validation: match the sheet's header row against an expected
// schema, position by position. Failures are values, never errors.

use crate::domain::schema::Schema;
use crate::domain::sheet::{cell_reference, RawSheet};
use crate::domain::verdict::{HeaderMismatch, ValidationVerdict};

/// Compare the header row at `header_row_index` (0-based) against the
/// schema's constrained positions.
///
/// Comparison is exact after trimming: case matters, internal whitespace
/// matters. A header row past the end of the sheet produces a single
/// mismatch describing the missing row rather than a fault.
pub fn validate_headers(
    sheet: &RawSheet,
    schema: &Schema,
    header_row_index: usize,
) -> ValidationVerdict {
    if header_row_index >= sheet.row_count() {
        return ValidationVerdict::Invalid(vec![HeaderMismatch {
            cell: cell_reference(header_row_index, 0),
            expected: format!("header row {}", header_row_index.saturating_add(1)),
            actual: format!("sheet ends at row {}", sheet.row_count()),
        }]);
    }

    let mut mismatches = Vec::new();
    for (column, expected) in schema.constrained() {
        let actual = sheet.cell(header_row_index, column).normalized();
        if actual != expected {
            mismatches.push(HeaderMismatch {
                cell: cell_reference(header_row_index, column),
                expected: expected.to_string(),
                actual,
            });
        }
    }
    ValidationVerdict::from_mismatches(mismatches)
}
