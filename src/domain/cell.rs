// ============================================================
// CELL VALUE
// ============================================================
// Decoded spreadsheet cell content, independent of file format

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// A single decoded cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    /// Cell is absent or holds no content
    Empty,

    /// Textual content, kept verbatim
    Text(String),

    /// Numeric content (integers are carried as whole-valued floats)
    Number(f64),

    /// Date or datetime content
    Date(NaiveDateTime),
}

impl CellValue {
    /// Whether the cell carries no usable content
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(n) => n.is_nan(),
            CellValue::Date(_) => false,
        }
    }

    /// Render the cell as the string that exports and comparisons see.
    ///
    /// Empty cells become the empty string, never a placeholder like "nan".
    /// Text loses leading and trailing whitespace, whole-valued numbers
    /// drop the decimal point, dates at midnight drop the time component.
    pub fn normalized(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.trim().to_string(),
            CellValue::Number(n) => {
                if n.is_nan() {
                    String::new()
                } else {
                    format!("{}", n)
                }
            }
            CellValue::Date(dt) => {
                let t = dt.time();
                if t.hour() == 0 && t.minute() == 0 && t.second() == 0 {
                    dt.format("%Y-%m-%d").to_string()
                } else {
                    dt.format("%Y-%m-%d %H:%M:%S").to_string()
                }
            }
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Empty
    }
}
