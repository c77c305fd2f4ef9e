// ============================================================
// SPREADSHEET DECODING
// ============================================================
// calamine adapter: uploaded bytes -> A1-anchored RawSheet grid

use calamine::{open_workbook_auto_from_rs, Data, DataType, Range, Reader};
use std::io::Cursor;
use tracing::{debug, error};

use crate::domain::artifact::UploadedArtifact;
use crate::domain::cell::CellValue;
use crate::domain::error::{PipelineError, Result};
use crate::domain::sheet::RawSheet;

/// Decode the first worksheet of an uploaded file into a dense grid.
///
/// The grid is anchored at cell A1: if the workbook's used range starts
/// below or right of A1, the gap is filled with empty cells so row and
/// column indexes always mean the same thing they mean in the sheet.
pub fn decode_sheet(artifact: &UploadedArtifact) -> Result<RawSheet> {
    let cursor = Cursor::new(artifact.bytes.as_slice());
    let mut workbook = open_workbook_auto_from_rs(cursor).map_err(|e| {
        error!(error = %e, filename = %artifact.filename, "Failed to open workbook");
        PipelineError::MalformedSpreadsheet(format!(
            "Cannot open '{}': {}",
            artifact.filename, e
        ))
    })?;

    let name = workbook.sheet_names().first().cloned().ok_or_else(|| {
        PipelineError::MalformedSpreadsheet(format!(
            "'{}' contains no worksheets",
            artifact.filename
        ))
    })?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| {
            PipelineError::MalformedSpreadsheet(format!(
                "'{}' contains no worksheets",
                artifact.filename
            ))
        })?
        .map_err(|e| {
            error!(error = %e, sheet = %name, "Failed to read worksheet range");
            PipelineError::MalformedSpreadsheet(format!(
                "Cannot read worksheet '{}': {}",
                name, e
            ))
        })?;

    let sheet = densify(name, &range);
    debug!(
        filename = %artifact.filename,
        sheet = %sheet.name,
        rows = sheet.row_count(),
        columns = sheet.column_count(),
        "decoded worksheet"
    );
    Ok(sheet)
}

/// Expand calamine's used range into a rectangular grid starting at A1
fn densify(name: String, range: &Range<Data>) -> RawSheet {
    let (start_row, start_col) = match range.start() {
        Some((row, col)) => (row as usize, col as usize),
        None => return RawSheet::new(name, Vec::new()),
    };

    let (_, width) = range.get_size();
    let mut cells: Vec<Vec<CellValue>> = Vec::new();
    for _ in 0..start_row {
        cells.push(vec![CellValue::Empty; start_col + width]);
    }
    for row in range.rows() {
        let mut dense = vec![CellValue::Empty; start_col];
        dense.extend(row.iter().map(decode_cell));
        cells.push(dense);
    }

    RawSheet::new(name, cells)
}

/// Fold a decoder cell into the closed domain variant.
///
/// Booleans and error cells carry no dedicated variant downstream; they
/// become their textual spreadsheet form.
fn decode_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
        Data::Error(e) => CellValue::Text(e.to_string()),
        other => match other.as_datetime() {
            Some(dt) => CellValue::Date(dt),
            None => CellValue::Text(other.to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    fn artifact_from(workbook: &mut Workbook) -> UploadedArtifact {
        let bytes = workbook.save_to_buffer().unwrap();
        UploadedArtifact::new("test.xlsx", bytes).unwrap()
    }

    #[test]
    fn test_garbage_bytes_are_malformed() {
        let artifact = UploadedArtifact::new("junk.xlsx", vec![0x00, 0x01, 0x02]).unwrap();
        let err = decode_sheet(&artifact).unwrap_err();
        assert!(matches!(err, PipelineError::MalformedSpreadsheet(_)));
    }

    #[test]
    fn test_strings_and_numbers_decode() {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Code").unwrap();
        sheet.write_number(0, 1, 42.0).unwrap();
        sheet.write_number(1, 1, 1.5).unwrap();

        let decoded = decode_sheet(&artifact_from(&mut workbook)).unwrap();
        assert_eq!(decoded.cell(0, 0), &CellValue::Text("Code".to_string()));
        assert_eq!(decoded.cell(0, 1), &CellValue::Number(42.0));
        assert_eq!(decoded.cell(1, 1), &CellValue::Number(1.5));
    }

    #[test]
    fn test_grid_is_anchored_at_a1() {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        // First content lives at C3; A1..B2 must still read as empty
        sheet.write_string(2, 2, "anchored").unwrap();

        let decoded = decode_sheet(&artifact_from(&mut workbook)).unwrap();
        assert_eq!(decoded.row_count(), 3);
        assert_eq!(decoded.column_count(), 3);
        assert_eq!(decoded.cell(0, 0), &CellValue::Empty);
        assert_eq!(decoded.cell(2, 2), &CellValue::Text("anchored".to_string()));
    }

    #[test]
    fn test_empty_worksheet_decodes_to_empty_grid() {
        let mut workbook = Workbook::new();
        workbook.add_worksheet();

        let decoded = decode_sheet(&artifact_from(&mut workbook)).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_sheet_name_is_preserved() {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name("Rates Q3").unwrap();
        sheet.write_string(0, 0, "x").unwrap();

        let decoded = decode_sheet(&artifact_from(&mut workbook)).unwrap();
        assert_eq!(decoded.name, "Rates Q3");
    }
}
