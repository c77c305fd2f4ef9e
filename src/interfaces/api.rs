// ============================================================
// RATESHEET SERVICE FACADE
// ============================================================
// The boundary an HTTP layer embeds: session-keyed upload / validate /
// preview / download operations over serde DTOs. Routing, templating,
// flash messages and cookie transport stay outside the crate.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use uuid::Uuid;

use crate::application::use_cases::export_table::{
    sheet_to_csv, sheet_to_workbook, table_to_csv, table_to_workbook,
};
use crate::application::use_cases::workflow::{ValidationParams, Workflow};
use crate::domain::artifact::{SheetFormat, UploadedArtifact};
use crate::domain::error::{PipelineError, Result};
use crate::domain::schema::Schema;
use crate::domain::verdict::ValidationVerdict;
use crate::infrastructure::config::PipelineConfig;
use crate::infrastructure::lookup::CountryLookup;
use crate::infrastructure::session_store::SessionStore;
use crate::infrastructure::spreadsheet::decode_sheet;

// Bare filename ending in .xls/.xlsx; path separators are rejected so the
// declared name can be echoed back in download headers untouched
static SPREADSHEET_FILENAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^/\\]+\.(?i:xlsx?)$").unwrap());

/// Which expected-header layout to validate against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SchemaChoice {
    /// The full 29-column ratesheet layout
    Ratesheet,

    /// The 5-column identity prefix
    RatesheetCore,

    /// Caller-supplied labels; empty strings are don't-care positions
    Custom { name: String, labels: Vec<String> },
}

impl SchemaChoice {
    fn schema(&self) -> Schema {
        match self {
            SchemaChoice::Ratesheet => Schema::ratesheet(),
            SchemaChoice::RatesheetCore => Schema::ratesheet_core(),
            SchemaChoice::Custom { name, labels } => Schema::new(name.clone(), labels.clone()),
        }
    }
}

impl Default for SchemaChoice {
    fn default() -> Self {
        SchemaChoice::Ratesheet
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadReceipt {
    pub filename: String,
    pub size_bytes: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateRequest {
    #[serde(default)]
    pub schema: SchemaChoice,

    /// Zero-based header row; the configured default when omitted
    #[serde(default)]
    pub header_row_index: Option<usize>,

    /// One-based first data row; the configured default when omitted
    #[serde(default)]
    pub data_start_row: Option<usize>,

    /// Width policy; the configured default when omitted
    #[serde(default)]
    pub strict_width: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub verdict: ValidationVerdict,

    /// Extracted record count, present only for a valid verdict
    pub record_count: Option<usize>,

    /// Bound column labels, empty when no table was produced
    pub columns: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TablePreview {
    pub columns: Vec<String>,
    pub records: Vec<Vec<String>>,
    pub total_records: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Download {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Session-keyed entry point over the ingestion pipeline
pub struct RatesheetService {
    config: PipelineConfig,
    sessions: SessionStore<Workflow>,
    lookup: Option<Arc<dyn CountryLookup>>,
}

impl RatesheetService {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            sessions: SessionStore::new(),
            lookup: None,
        }
    }

    /// Attach the country-lookup collaborator used for TADIG enrichment
    pub fn with_lookup(mut self, lookup: Arc<dyn CountryLookup>) -> Self {
        self.lookup = Some(lookup);
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Fresh session id for a caller that does not have one yet
    pub fn new_session_id(&self) -> String {
        Uuid::new_v4().to_string()
    }

    /// Accept an uploaded spreadsheet for the session, replacing whatever
    /// the session held before
    pub fn upload(&self, session_id: &str, filename: &str, bytes: Vec<u8>) -> Result<UploadReceipt> {
        if !SPREADSHEET_FILENAME.is_match(filename) {
            warn!(
                session = %session_id,
                filename = %filename,
                "upload rejected: unsupported file type"
            );
            return Err(PipelineError::UnsupportedFileType(format!(
                "'{}' is not an .xls or .xlsx filename",
                filename
            )));
        }
        if bytes.len() > self.config.max_upload_bytes {
            warn!(
                session = %session_id,
                bytes = bytes.len(),
                limit = self.config.max_upload_bytes,
                "upload rejected: artifact too large"
            );
            return Err(PipelineError::ArtifactTooLarge(format!(
                "{} bytes exceeds the {} byte limit",
                bytes.len(),
                self.config.max_upload_bytes
            )));
        }

        let artifact = UploadedArtifact::new(filename, bytes)?;
        let receipt = UploadReceipt {
            filename: artifact.filename.clone(),
            size_bytes: artifact.size_bytes(),
        };

        let handle = self.sessions.session(session_id);
        handle.lock().unwrap().upload(artifact);
        info!(session = %session_id, filename = %receipt.filename, "upload accepted");
        Ok(receipt)
    }

    /// Validate the session's artifact and, on success, extract its data
    /// region
    pub fn validate(&self, session_id: &str, request: &ValidateRequest) -> Result<ValidationReport> {
        let params = ValidationParams {
            header_row_index: request
                .header_row_index
                .unwrap_or(self.config.header_row_index),
            data_start_row: request.data_start_row.unwrap_or(self.config.data_start_row),
            strict_width: request.strict_width.unwrap_or(self.config.strict_width),
        };
        let schema = request.schema.schema();

        let handle = self.sessions.get(session_id).ok_or_else(no_artifact)?;
        let mut workflow = handle.lock().unwrap();
        let verdict = workflow.validate(&schema, &params, self.lookup.as_deref())?;

        let (record_count, columns) = match workflow.table() {
            Some(table) => (Some(table.record_count()), table.columns.clone()),
            None => (None, Vec::new()),
        };
        Ok(ValidationReport {
            verdict,
            record_count,
            columns,
        })
    }

    /// First `limit` extracted records, for display
    pub fn preview(&self, session_id: &str, limit: usize) -> Result<TablePreview> {
        let handle = self.sessions.get(session_id).ok_or_else(no_artifact)?;
        let workflow = handle.lock().unwrap();
        let table = workflow.table().ok_or_else(|| {
            PipelineError::PreconditionViolation(
                "no extracted table to preview; validate a spreadsheet first".to_string(),
            )
        })?;
        Ok(TablePreview {
            columns: table.columns.clone(),
            records: table.records.iter().take(limit).cloned().collect(),
            total_records: table.record_count(),
        })
    }

    /// The uploaded file, byte for byte, with its MIME type by extension
    pub fn download_original(&self, session_id: &str) -> Result<Download> {
        let handle = self.sessions.get(session_id).ok_or_else(no_artifact)?;
        let workflow = handle.lock().unwrap();
        let artifact = workflow.artifact().ok_or_else(no_artifact)?;
        Ok(Download {
            filename: artifact.filename.clone(),
            content_type: artifact.format.content_type().to_string(),
            bytes: artifact.bytes.clone(),
        })
    }

    /// CSV of the extracted table when one exists, otherwise of the whole
    /// uploaded file without validation
    pub fn download_csv(&self, session_id: &str) -> Result<Download> {
        let handle = self.sessions.get(session_id).ok_or_else(no_artifact)?;
        let workflow = handle.lock().unwrap();
        let artifact = workflow.artifact().ok_or_else(no_artifact)?;

        let bytes = match workflow.table() {
            Some(table) => table_to_csv(table)?,
            None => sheet_to_csv(&decode_sheet(artifact)?)?,
        };
        let download = Download {
            filename: format!("{}.csv", artifact.stem()),
            content_type: "text/csv".to_string(),
            bytes,
        };
        info!(
            session = %session_id,
            filename = %download.filename,
            bytes = download.bytes.len(),
            "CSV download prepared"
        );
        Ok(download)
    }

    /// Same selection as the CSV download, as an xlsx workbook
    pub fn download_workbook(&self, session_id: &str) -> Result<Download> {
        let handle = self.sessions.get(session_id).ok_or_else(no_artifact)?;
        let workflow = handle.lock().unwrap();
        let artifact = workflow.artifact().ok_or_else(no_artifact)?;

        let bytes = match workflow.table() {
            Some(table) => table_to_workbook(table)?,
            None => sheet_to_workbook(&decode_sheet(artifact)?)?,
        };
        Ok(Download {
            filename: format!("{}.xlsx", artifact.stem()),
            content_type: SheetFormat::Xlsx.content_type().to_string(),
            bytes,
        })
    }

    /// Drop the session's workflow outright
    pub fn reset(&self, session_id: &str) {
        self.sessions.remove(session_id);
        info!(session = %session_id, "session reset");
    }

    /// Drop sessions idle past the configured age; returns how many went
    pub fn purge_idle_sessions(&self) -> usize {
        self.sessions
            .purge_idle(Duration::from_secs(self.config.session_idle_secs))
    }
}

fn no_artifact() -> PipelineError {
    PipelineError::PreconditionViolation("no spreadsheet uploaded for this session".to_string())
}
