// ============================================================
// RATESHEET WORKFLOW
// ============================================================
// Sequences upload -> validate -> (extract) -> export across independent
// requests. One workflow per session; the session store serializes
// access, so the state machine itself is single-threaded.

use tracing::info;

use crate::application::use_cases::extract_rows::{extract_rows, ExtractOptions};
use crate::application::use_cases::validate_headers::validate_headers;
use crate::domain::artifact::UploadedArtifact;
use crate::domain::error::{PipelineError, Result};
use crate::domain::schema::Schema;
use crate::domain::table::ExtractedTable;
use crate::domain::verdict::ValidationVerdict;
use crate::infrastructure::lookup::CountryLookup;
use crate::infrastructure::spreadsheet::decode_sheet;

/// Row addressing and extraction tuning for one validation pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationParams {
    /// Zero-based index of the row holding the header labels
    pub header_row_index: usize,

    /// One-based index of the first data row
    pub data_start_row: usize,

    /// Bind exactly the schema's column count instead of every physical
    /// column
    pub strict_width: bool,
}

/// What the session currently holds
pub enum WorkflowState {
    /// Nothing uploaded yet
    Empty,

    /// An artifact is held but has not been validated
    Uploaded { artifact: UploadedArtifact },

    /// The latest verdict is cached; the table exists iff it was valid
    Validated {
        artifact: UploadedArtifact,
        verdict: ValidationVerdict,
        table: Option<ExtractedTable>,
    },
}

/// Per-session ingestion state machine
pub struct Workflow {
    state: WorkflowState,
}

impl Workflow {
    pub fn new() -> Self {
        Self {
            state: WorkflowState::Empty,
        }
    }

    /// Accept a new artifact, discarding any prior verdict and table
    pub fn upload(&mut self, artifact: UploadedArtifact) {
        info!(
            filename = %artifact.filename,
            bytes = artifact.size_bytes(),
            "artifact uploaded, prior workflow state discarded"
        );
        self.state = WorkflowState::Uploaded { artifact };
    }

    /// Validate the held artifact's header row and, when it matches,
    /// extract the data region.
    ///
    /// Always recomputes from the original bytes; a previously extracted
    /// table is never re-validated. A decode failure leaves the current
    /// state untouched.
    pub fn validate(
        &mut self,
        schema: &Schema,
        params: &ValidationParams,
        lookup: Option<&dyn CountryLookup>,
    ) -> Result<ValidationVerdict> {
        if params.data_start_row == 0 {
            return Err(PipelineError::ConfigurationError(
                "data start row is 1-based and must be positive".to_string(),
            ));
        }

        let artifact = self.artifact().ok_or_else(|| {
            PipelineError::PreconditionViolation(
                "validation requires an uploaded spreadsheet".to_string(),
            )
        })?;

        let sheet = decode_sheet(artifact)?;
        let verdict = validate_headers(&sheet, schema, params.header_row_index);
        let table = if verdict.is_valid() {
            let options = ExtractOptions {
                strict_width: params.strict_width,
                country_lookup: lookup,
            };
            Some(extract_rows(&sheet, schema, params.data_start_row, &options)?)
        } else {
            None
        };

        info!(
            schema = %schema.name,
            valid = verdict.is_valid(),
            mismatches = verdict.mismatches().len(),
            records = table.as_ref().map(|t| t.record_count()).unwrap_or(0),
            "ratesheet validated"
        );

        // The held artifact moves into the new state; the Empty arm cannot
        // be reached because an artifact was borrowed above.
        self.state = match std::mem::replace(&mut self.state, WorkflowState::Empty) {
            WorkflowState::Uploaded { artifact }
            | WorkflowState::Validated { artifact, .. } => WorkflowState::Validated {
                artifact,
                verdict: verdict.clone(),
                table,
            },
            WorkflowState::Empty => WorkflowState::Empty,
        };
        Ok(verdict)
    }

    /// Drop everything the session holds
    pub fn reset(&mut self) {
        self.state = WorkflowState::Empty;
    }

    /// The held artifact, in any non-empty state
    pub fn artifact(&self) -> Option<&UploadedArtifact> {
        match &self.state {
            WorkflowState::Empty => None,
            WorkflowState::Uploaded { artifact } => Some(artifact),
            WorkflowState::Validated { artifact, .. } => Some(artifact),
        }
    }

    /// The verdict cached by the latest validation, if any
    pub fn verdict(&self) -> Option<&ValidationVerdict> {
        match &self.state {
            WorkflowState::Validated { verdict, .. } => Some(verdict),
            _ => None,
        }
    }

    /// The extracted table, present only after a valid verdict
    pub fn table(&self) -> Option<&ExtractedTable> {
        match &self.state {
            WorkflowState::Validated { table, .. } => table.as_ref(),
            _ => None,
        }
    }

    /// Short state label for logs and diagnostics
    pub fn state_name(&self) -> &'static str {
        match &self.state {
            WorkflowState::Empty => "empty",
            WorkflowState::Uploaded { .. } => "uploaded",
            WorkflowState::Validated { .. } => "validated",
        }
    }
}

impl Default for Workflow {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    /// Build real xlsx bytes shaped like a ratesheet: metadata in the top
    /// rows, header labels in row 4, two data records from row 7 on.
    fn ratesheet_bytes(tadig_header: &str) -> Vec<u8> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Operator ratesheet").unwrap();
        sheet.write_string(1, 0, "Q3 2026").unwrap();

        let headers = [
            "BU PLMN Code",
            tadig_header,
            "Start date",
            "End date",
            "Currency",
        ];
        for (i, label) in headers.iter().enumerate() {
            sheet.write_string(3, i as u16, *label).unwrap();
        }

        for (row, (bu, tadig)) in [("BU0", "DEU01"), ("BU1", "FRA02")].iter().enumerate() {
            let row = (6 + row) as u32;
            sheet.write_string(row, 0, *bu).unwrap();
            sheet.write_string(row, 1, *tadig).unwrap();
            sheet.write_string(row, 2, "2026-01-01").unwrap();
            sheet.write_string(row, 3, "2026-12-31").unwrap();
            sheet.write_string(row, 4, "EUR").unwrap();
        }
        workbook.save_to_buffer().unwrap()
    }

    fn params() -> ValidationParams {
        ValidationParams {
            header_row_index: 3,
            data_start_row: 7,
            strict_width: false,
        }
    }

    fn uploaded_workflow() -> Workflow {
        let mut workflow = Workflow::new();
        let artifact =
            UploadedArtifact::new("rates.xlsx", ratesheet_bytes("TADIG PLMN Code")).unwrap();
        workflow.upload(artifact);
        workflow
    }

    #[test]
    fn test_valid_validation_builds_the_table() {
        let mut workflow = uploaded_workflow();
        let verdict = workflow
            .validate(&Schema::ratesheet_core(), &params(), None)
            .unwrap();

        assert!(verdict.is_valid());
        assert_eq!(workflow.state_name(), "validated");
        let table = workflow.table().unwrap();
        assert_eq!(table.record_count(), 2);
        assert_eq!(table.value(0, "BU PLMN Code"), Some("BU0"));
        assert_eq!(table.value(1, "TADIG PLMN Code"), Some("FRA02"));
    }

    #[test]
    fn test_invalid_header_caches_the_verdict_without_a_table() {
        let mut workflow = Workflow::new();
        let artifact =
            UploadedArtifact::new("rates.xlsx", ratesheet_bytes("Wrong")).unwrap();
        workflow.upload(artifact);

        let verdict = workflow
            .validate(&Schema::ratesheet_core(), &params(), None)
            .unwrap();
        assert_eq!(verdict.mismatches().len(), 1);
        assert_eq!(verdict.mismatches()[0].cell, "B4");
        assert_eq!(workflow.state_name(), "validated");
        assert!(workflow.table().is_none());
        assert_eq!(workflow.verdict(), Some(&verdict));
    }

    #[test]
    fn test_revalidation_recomputes_from_the_original_bytes() {
        let mut workflow = uploaded_workflow();
        workflow
            .validate(&Schema::ratesheet_core(), &params(), None)
            .unwrap();
        assert!(workflow.table().is_some());

        // A schema the same bytes cannot satisfy: the table must go away,
        // proving validation never runs against the previous extraction
        let other = Schema::new(
            "other",
            vec!["Completely".to_string(), "Different".to_string()],
        );
        let verdict = workflow.validate(&other, &params(), None).unwrap();
        assert!(!verdict.is_valid());
        assert!(workflow.table().is_none());

        // And back again with the right schema
        let verdict = workflow
            .validate(&Schema::ratesheet_core(), &params(), None)
            .unwrap();
        assert!(verdict.is_valid());
        assert_eq!(workflow.table().unwrap().record_count(), 2);
    }

    #[test]
    fn test_revalidation_with_identical_inputs_is_idempotent() {
        let mut workflow = uploaded_workflow();
        let first = workflow
            .validate(&Schema::ratesheet_core(), &params(), None)
            .unwrap();
        let first_table = workflow.table().cloned();

        let second = workflow
            .validate(&Schema::ratesheet_core(), &params(), None)
            .unwrap();
        assert_eq!(first, second);
        assert_eq!(workflow.table().cloned(), first_table);
    }

    #[test]
    fn test_validate_without_an_artifact_is_a_precondition_violation() {
        let mut workflow = Workflow::new();
        let err = workflow
            .validate(&Schema::ratesheet_core(), &params(), None)
            .unwrap_err();
        assert!(matches!(err, PipelineError::PreconditionViolation(_)));
        assert_eq!(workflow.state_name(), "empty");
    }

    #[test]
    fn test_malformed_bytes_leave_the_state_untouched() {
        let mut workflow = Workflow::new();
        let artifact = UploadedArtifact::new("junk.xlsx", vec![0xde, 0xad]).unwrap();
        workflow.upload(artifact);

        let err = workflow
            .validate(&Schema::ratesheet_core(), &params(), None)
            .unwrap_err();
        assert!(matches!(err, PipelineError::MalformedSpreadsheet(_)));
        assert_eq!(workflow.state_name(), "uploaded");
        assert_eq!(workflow.artifact().unwrap().filename, "junk.xlsx");
    }

    #[test]
    fn test_zero_data_start_row_is_a_configuration_error() {
        let mut workflow = uploaded_workflow();
        let bad = ValidationParams {
            data_start_row: 0,
            ..params()
        };
        let err = workflow
            .validate(&Schema::ratesheet_core(), &bad, None)
            .unwrap_err();
        assert!(matches!(err, PipelineError::ConfigurationError(_)));
    }

    #[test]
    fn test_upload_discards_the_previous_session_state() {
        let mut workflow = uploaded_workflow();
        workflow
            .validate(&Schema::ratesheet_core(), &params(), None)
            .unwrap();
        assert!(workflow.table().is_some());

        let replacement =
            UploadedArtifact::new("newer.xlsx", ratesheet_bytes("TADIG PLMN Code")).unwrap();
        workflow.upload(replacement);
        assert_eq!(workflow.state_name(), "uploaded");
        assert!(workflow.verdict().is_none());
        assert!(workflow.table().is_none());
        assert_eq!(workflow.artifact().unwrap().filename, "newer.xlsx");
    }

    #[test]
    fn test_reset_returns_to_empty() {
        let mut workflow = uploaded_workflow();
        workflow.reset();
        assert_eq!(workflow.state_name(), "empty");
        assert!(workflow.artifact().is_none());
    }
}
