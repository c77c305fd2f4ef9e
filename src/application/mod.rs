pub mod use_cases;

pub use use_cases::export_table::{sheet_to_csv, sheet_to_workbook, table_to_csv, table_to_workbook};
pub use use_cases::extract_rows::{extract_rows, ExtractOptions};
pub use use_cases::validate_headers::validate_headers;
pub use use_cases::workflow::{ValidationParams, Workflow, WorkflowState};
