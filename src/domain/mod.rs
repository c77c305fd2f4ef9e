pub mod artifact;
pub mod cell;
pub mod error;
pub mod schema;
pub mod sheet;
pub mod table;
pub mod verdict;
