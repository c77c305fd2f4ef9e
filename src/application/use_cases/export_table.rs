// ============================================================
// TABLE EXPORT
// ============================================================
// Serialize extracted tables (and, for the whole-file conversion paths,
// the raw grid) to CSV or xlsx bytes. Column order is preserved exactly;
// missing values come out as empty fields, never placeholder text.

use rust_xlsxwriter::Workbook;
use tracing::debug;

use crate::domain::cell::CellValue;
use crate::domain::error::{PipelineError, Result};
use crate::domain::sheet::RawSheet;
use crate::domain::table::ExtractedTable;

/// Render an extracted table as CSV: one header row, then records in order
pub fn table_to_csv(table: &ExtractedTable) -> Result<Vec<u8>> {
    if table.column_count() == 0 {
        return Ok(Vec::new());
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(&table.columns)
        .map_err(|e| PipelineError::ExportError(format!("CSV header row: {}", e)))?;
    for record in &table.records {
        writer
            .write_record(record)
            .map_err(|e| PipelineError::ExportError(format!("CSV record: {}", e)))?;
    }
    finish_csv(writer)
}

/// Render the raw grid as CSV with no schema binding, row for row
pub fn sheet_to_csv(sheet: &RawSheet) -> Result<Vec<u8>> {
    if sheet.column_count() == 0 {
        return Ok(Vec::new());
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in &sheet.cells {
        let fields: Vec<String> = row.iter().map(|cell| cell.normalized()).collect();
        writer
            .write_record(&fields)
            .map_err(|e| PipelineError::ExportError(format!("CSV record: {}", e)))?;
    }
    finish_csv(writer)
}

fn finish_csv(writer: csv::Writer<Vec<u8>>) -> Result<Vec<u8>> {
    writer
        .into_inner()
        .map_err(|e| PipelineError::ExportError(format!("CSV flush: {}", e)))
}

/// Render an extracted table as an xlsx workbook in memory
pub fn table_to_workbook(table: &ExtractedTable) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (column, label) in table.columns.iter().enumerate() {
        worksheet
            .write_string(0, column as u16, label.as_str())
            .map_err(|e| PipelineError::ExportError(format!("workbook header: {}", e)))?;
    }
    for (row, record) in table.records.iter().enumerate() {
        for (column, value) in record.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            worksheet
                .write_string((row + 1) as u32, column as u16, value.as_str())
                .map_err(|e| PipelineError::ExportError(format!("workbook cell: {}", e)))?;
        }
    }

    let bytes = workbook
        .save_to_buffer()
        .map_err(|e| PipelineError::ExportError(format!("workbook buffer: {}", e)))?;
    debug!(
        records = table.record_count(),
        bytes = bytes.len(),
        "serialized table workbook"
    );
    Ok(bytes)
}

/// Render the raw grid as an xlsx workbook, keeping numbers numeric
pub fn sheet_to_workbook(sheet: &RawSheet) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    if !sheet.name.is_empty() {
        worksheet
            .set_name(sheet.name.as_str())
            .map_err(|e| PipelineError::ExportError(format!("worksheet name: {}", e)))?;
    }

    for (row, cells) in sheet.cells.iter().enumerate() {
        for (column, cell) in cells.iter().enumerate() {
            match cell {
                CellValue::Empty => {}
                CellValue::Number(n) if n.is_nan() => {}
                CellValue::Number(n) => {
                    worksheet
                        .write_number(row as u32, column as u16, *n)
                        .map_err(|e| {
                            PipelineError::ExportError(format!("workbook cell: {}", e))
                        })?;
                }
                other => {
                    let text = other.normalized();
                    if !text.is_empty() {
                        worksheet
                            .write_string(row as u32, column as u16, text.as_str())
                            .map_err(|e| {
                                PipelineError::ExportError(format!("workbook cell: {}", e))
                            })?;
                    }
                }
            }
        }
    }

    workbook
        .save_to_buffer()
        .map_err(|e| PipelineError::ExportError(format!("workbook buffer: {}", e)))
}
