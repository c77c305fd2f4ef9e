// Data-region extraction: slice the sheet below the header into
// normalized records bound to the validated schema's labels.
//
// Callers run header validation first; extraction trusts the sheet and
// schema it is given.

use tracing::debug;

use crate::domain::error::{PipelineError, Result};
use crate::domain::schema::Schema;
use crate::domain::sheet::RawSheet;
use crate::domain::table::ExtractedTable;
use crate::infrastructure::lookup::{CountryLookup, LookupOutcome};

/// Column label that triggers country enrichment when a lookup is supplied
const TADIG_LABEL: &str = "TADIG PLMN Code";

/// Label of the appended enrichment column
const COUNTRY_LABEL: &str = "Country";

/// Rendered for a prefix the lookup service does not know
const UNKNOWN_SENTINEL: &str = "Unknown";

/// Rendered when the lookup service itself fails to answer
const FAILED_SENTINEL: &str = "Lookup failed";

/// Extraction tuning plus the optional enrichment collaborator
pub struct ExtractOptions<'a> {
    /// Take exactly the schema's column count (true) or every physical
    /// column the sheet has (false); both behaviors exist in the field
    pub strict_width: bool,

    /// Country lookup for TADIG-prefix enrichment, when available
    pub country_lookup: Option<&'a dyn CountryLookup>,
}

impl Default for ExtractOptions<'_> {
    fn default() -> Self {
        Self {
            strict_width: false,
            country_lookup: None,
        }
    }
}

/// Slice the data region into an `ExtractedTable`.
///
/// `data_start_row` is 1-based, matching how the row is named in the
/// sheet itself; zero is a configuration error. A start at or past the
/// physical end of the sheet yields a zero-record table with the correct
/// columns. Extraction never pads rows that do not exist.
pub fn extract_rows(
    sheet: &RawSheet,
    schema: &Schema,
    data_start_row: usize,
    options: &ExtractOptions,
) -> Result<ExtractedTable> {
    if data_start_row == 0 {
        return Err(PipelineError::ConfigurationError(
            "data start row is 1-based and must be positive".to_string(),
        ));
    }
    let first_row = data_start_row - 1;

    let width = if options.strict_width {
        schema.len()
    } else {
        sheet.column_count()
    };
    let columns: Vec<String> = (0..width).map(|i| schema.bound_label(i)).collect();

    let mut records = Vec::new();
    for row in first_row..sheet.row_count() {
        let record: Vec<String> = (0..width)
            .map(|column| sheet.cell(row, column).normalized())
            .collect();
        records.push(record);
    }

    let mut table = ExtractedTable::new(columns, records);
    if let Some(lookup) = options.country_lookup {
        enrich_with_countries(&mut table, lookup);
    }

    debug!(
        sheet = %sheet.name,
        records = table.record_count(),
        columns = table.column_count(),
        "extracted data region"
    );
    Ok(table)
}

/// Append a "Country" column resolved from the first three characters of
/// each record's TADIG PLMN code.
///
/// Lookup misses and lookup failures become sentinel strings; they never
/// abort extraction. Blank TADIG values skip the lookup and leave the
/// country cell empty.
fn enrich_with_countries(table: &mut ExtractedTable, lookup: &dyn CountryLookup) {
    let tadig_column = match table.columns.iter().position(|c| c == TADIG_LABEL) {
        Some(index) => index,
        None => return,
    };

    table.columns.push(COUNTRY_LABEL.to_string());
    for record in &mut table.records {
        let prefix: String = record[tadig_column].chars().take(3).collect();
        let country = if prefix.is_empty() {
            String::new()
        } else {
            match lookup.country_name(&prefix) {
                LookupOutcome::Found(name) => name,
                LookupOutcome::Unknown => UNKNOWN_SENTINEL.to_string(),
                LookupOutcome::Failed => FAILED_SENTINEL.to_string(),
            }
        };
        record.push(country);
    }
}
