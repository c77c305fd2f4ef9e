// ============================================================
// RAW SHEET GRID
// ============================================================
// Worksheet contents anchored at A1, before any schema is applied

use serde::{Deserialize, Serialize};

use super::cell::CellValue;

/// Spreadsheet-style column letters for a zero-based index.
///
/// Bijective base-26: 0 -> "A", 25 -> "Z", 26 -> "AA", 701 -> "ZZ",
/// 702 -> "AAA".
pub fn column_letter(index: usize) -> String {
    let mut index = index;
    let mut letters: Vec<char> = Vec::new();
    loop {
        let rem = (index % 26) as u8;
        letters.push((b'A' + rem) as char);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    letters.iter().rev().collect()
}

/// A1-style reference for a zero-based (row, column) pair: (3, 1) -> "B4".
/// The one-based row saturates instead of overflowing.
pub fn cell_reference(row: usize, column: usize) -> String {
    format!("{}{}", column_letter(column), row.saturating_add(1))
}

/// A fully decoded worksheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSheet {
    /// Worksheet name as stored in the workbook
    pub name: String,

    /// Dense rectangular grid; row 0 and column 0 correspond to cell A1
    pub cells: Vec<Vec<CellValue>>,
}

impl RawSheet {
    /// Create a sheet, padding ragged rows so the grid is rectangular
    pub fn new(name: String, mut cells: Vec<Vec<CellValue>>) -> Self {
        let width = cells.iter().map(|row| row.len()).max().unwrap_or(0);
        for row in &mut cells {
            row.resize(width, CellValue::Empty);
        }
        Self { name, cells }
    }

    /// Number of rows in the grid
    pub fn row_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of columns in the grid
    pub fn column_count(&self) -> usize {
        self.cells.first().map(|row| row.len()).unwrap_or(0)
    }

    /// Cell at a zero-based position; out-of-bounds reads as an empty cell
    pub fn cell(&self, row: usize, column: usize) -> &CellValue {
        static EMPTY: CellValue = CellValue::Empty;
        self.cells
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&EMPTY)
    }

    /// Borrow a full row, if present
    pub fn row(&self, index: usize) -> Option<&[CellValue]> {
        self.cells.get(index).map(|r| r.as_slice())
    }

    /// Whether the sheet holds no cells at all
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_letters_single() {
        assert_eq!(column_letter(0), "A");
        assert_eq!(column_letter(1), "B");
        assert_eq!(column_letter(25), "Z");
    }

    #[test]
    fn test_column_letters_double_and_triple() {
        assert_eq!(column_letter(26), "AA");
        assert_eq!(column_letter(27), "AB");
        assert_eq!(column_letter(51), "AZ");
        assert_eq!(column_letter(52), "BA");
        assert_eq!(column_letter(701), "ZZ");
        assert_eq!(column_letter(702), "AAA");
    }

    #[test]
    fn test_cell_reference_uses_one_based_rows() {
        assert_eq!(cell_reference(0, 0), "A1");
        assert_eq!(cell_reference(3, 1), "B4");
        assert_eq!(cell_reference(6, 26), "AA7");
    }

    #[test]
    fn test_cell_reference_row_saturates_instead_of_overflowing() {
        assert_eq!(
            cell_reference(usize::MAX, 0),
            format!("A{}", usize::MAX)
        );
    }

    #[test]
    fn test_ragged_rows_are_padded() {
        let sheet = RawSheet::new(
            "Sheet1".to_string(),
            vec![
                vec![CellValue::Text("a".to_string())],
                vec![
                    CellValue::Text("b".to_string()),
                    CellValue::Text("c".to_string()),
                ],
            ],
        );
        assert_eq!(sheet.column_count(), 2);
        assert_eq!(sheet.cell(0, 1), &CellValue::Empty);
    }

    #[test]
    fn test_out_of_bounds_reads_as_empty() {
        let sheet = RawSheet::new("Sheet1".to_string(), vec![]);
        assert_eq!(sheet.cell(10, 10), &CellValue::Empty);
        assert_eq!(sheet.row_count(), 0);
        assert_eq!(sheet.column_count(), 0);
    }
}
