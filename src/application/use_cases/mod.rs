pub mod export_table;
pub mod extract_rows;
pub mod validate_headers;
pub mod workflow;
