// ============================================================
// UPLOADED ARTIFACT
// ============================================================
// The raw uploaded file a session holds on to between requests

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::{PipelineError, Result};

/// Spreadsheet file format, derived from the filename extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SheetFormat {
    Xls,
    Xlsx,
}

impl SheetFormat {
    /// Detect the format from a filename, case-insensitive.
    ///
    /// Anything other than `.xls` / `.xlsx` is rejected before the
    /// pipeline ever sees the bytes.
    pub fn from_filename(filename: &str) -> Result<Self> {
        let lower = filename.to_ascii_lowercase();
        if lower.ends_with(".xlsx") {
            Ok(SheetFormat::Xlsx)
        } else if lower.ends_with(".xls") {
            Ok(SheetFormat::Xls)
        } else {
            Err(PipelineError::UnsupportedFileType(format!(
                "'{}' does not end in .xls or .xlsx",
                filename
            )))
        }
    }

    /// MIME type used when the file is served back to the caller
    pub fn content_type(&self) -> &'static str {
        match self {
            SheetFormat::Xls => "application/vnd.ms-excel",
            SheetFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }
}

/// A raw uploaded spreadsheet, kept verbatim for re-decoding and download
#[derive(Debug, Clone)]
pub struct UploadedArtifact {
    /// Declared filename, as uploaded
    pub filename: String,

    /// Detected format
    pub format: SheetFormat,

    /// Unmodified file content
    pub bytes: Vec<u8>,

    /// When the upload was accepted
    pub uploaded_at: DateTime<Utc>,
}

impl UploadedArtifact {
    /// Create an artifact; the filename must carry a recognized extension
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Result<Self> {
        let filename = filename.into();
        let format = SheetFormat::from_filename(&filename)?;
        Ok(Self {
            filename,
            format,
            bytes,
            uploaded_at: Utc::now(),
        })
    }

    /// Size of the raw content in bytes
    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }

    /// Filename without its extension, used to derive export filenames
    pub fn stem(&self) -> &str {
        self.filename
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .unwrap_or(&self.filename)
    }
}
