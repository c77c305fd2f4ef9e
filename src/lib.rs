pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

pub use crate::application::use_cases::workflow::{ValidationParams, Workflow, WorkflowState};
pub use crate::domain::artifact::{SheetFormat, UploadedArtifact};
pub use crate::domain::cell::CellValue;
pub use crate::domain::error::{PipelineError, Result};
pub use crate::domain::schema::Schema;
pub use crate::domain::sheet::RawSheet;
pub use crate::domain::table::ExtractedTable;
pub use crate::domain::verdict::{HeaderMismatch, ValidationVerdict};
pub use crate::infrastructure::config::PipelineConfig;
pub use crate::infrastructure::lookup::{CountryLookup, InMemoryCountryLookup, LookupOutcome};
pub use crate::interfaces::api::{
    Download, RatesheetService, SchemaChoice, TablePreview, UploadReceipt, ValidateRequest,
    ValidationReport,
};
