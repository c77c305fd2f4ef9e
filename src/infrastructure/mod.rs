pub mod config;
pub mod lookup;
pub mod session_store;
pub mod spreadsheet;
