use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelineError {
    UnsupportedFileType(String),
    MalformedSpreadsheet(String),
    PreconditionViolation(String),
    ConfigurationError(String),
    ArtifactTooLarge(String),
    ExportError(String),
    IoError(String),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::UnsupportedFileType(msg) => write!(f, "Unsupported file type: {}", msg),
            PipelineError::MalformedSpreadsheet(msg) => {
                write!(f, "Malformed spreadsheet: {}", msg)
            }
            PipelineError::PreconditionViolation(msg) => {
                write!(f, "Precondition violation: {}", msg)
            }
            PipelineError::ConfigurationError(msg) => write!(f, "Configuration error: {}", msg),
            PipelineError::ArtifactTooLarge(msg) => write!(f, "Artifact too large: {}", msg),
            PipelineError::ExportError(msg) => write!(f, "Export error: {}", msg),
            PipelineError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

// Implement std::error::Error so callers can box/propagate the pipeline error
impl std::error::Error for PipelineError {}

impl From<std::io::Error> for PipelineError {
    fn from(err: std::io::Error) -> Self {
        PipelineError::IoError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
