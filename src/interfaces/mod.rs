pub mod api;

pub use api::{
    Download, RatesheetService, SchemaChoice, TablePreview, UploadReceipt, ValidateRequest,
    ValidationReport,
};
