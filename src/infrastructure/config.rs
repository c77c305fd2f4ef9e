// ============================================================
// PIPELINE CONFIGURATION
// ============================================================
// Defaults, then `ratebridge.toml`, then RATEBRIDGE_* environment
// variables. Loaded once by the host and handed to the service.

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::domain::error::{PipelineError, Result};

/// Tunable pipeline parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Zero-based index of the row holding the header labels
    pub header_row_index: usize,

    /// One-based index of the first data row
    pub data_start_row: usize,

    /// Require the data region to match the schema's column count exactly
    pub strict_width: bool,

    /// Upload size cap in bytes
    pub max_upload_bytes: usize,

    /// Seconds of inactivity before a session may be purged
    pub session_idle_secs: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            header_row_index: 3,
            data_start_row: 7,
            strict_width: false,
            max_upload_bytes: 10 * 1024 * 1024,
            session_idle_secs: 30 * 60,
        }
    }
}

impl PipelineConfig {
    /// Load configuration from the standard provider chain
    pub fn load() -> Result<Self> {
        Self::from_figment(
            Figment::from(Serialized::defaults(PipelineConfig::default()))
                .merge(Toml::file("ratebridge.toml"))
                .merge(Env::prefixed("RATEBRIDGE_")),
        )
    }

    fn from_figment(figment: Figment) -> Result<Self> {
        let config: PipelineConfig = figment
            .extract()
            .map_err(|e| PipelineError::ConfigurationError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the pipeline cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.data_start_row == 0 {
            return Err(PipelineError::ConfigurationError(
                "data_start_row is 1-based and must be positive".to_string(),
            ));
        }
        if self.max_upload_bytes == 0 {
            return Err(PipelineError::ConfigurationError(
                "max_upload_bytes must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_the_ratesheet_layout() {
        let config = PipelineConfig::default();
        assert_eq!(config.header_row_index, 3);
        assert_eq!(config.data_start_row, 7);
        assert!(!config.strict_width);
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_overrides_defaults() {
        let figment = Figment::from(Serialized::defaults(PipelineConfig::default()))
            .merge(Toml::string("data_start_row = 9\nstrict_width = true"));
        let config = PipelineConfig::from_figment(figment).unwrap();
        assert_eq!(config.data_start_row, 9);
        assert!(config.strict_width);
        assert_eq!(config.header_row_index, 3);
    }

    #[test]
    fn test_zero_data_start_row_is_rejected() {
        let figment = Figment::from(Serialized::defaults(PipelineConfig::default()))
            .merge(Toml::string("data_start_row = 0"));
        let err = PipelineConfig::from_figment(figment).unwrap_err();
        assert!(matches!(err, PipelineError::ConfigurationError(_)));
    }
}
