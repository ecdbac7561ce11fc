//! Configuration structures for the summarizer.

use serde::{Deserialize, Serialize};

use crate::error::BriefError;
use crate::pdf::{PdfEngine, DEFAULT_MAX_UPLOAD_BYTES};
use crate::summarize::SummaryLength;

/// Main configuration for brief.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BriefConfig {
    /// Summarization engine configuration.
    pub summarizer: SummarizerConfig,

    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Page defaults.
    pub page: PageConfig,
}

/// Hosted summarization model settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    /// Base URL of the inference service; the model id is appended.
    pub endpoint: String,

    /// Model id.
    pub model: String,

    /// Bearer token. When unset the CLI falls back to `HF_TOKEN`.
    pub api_token: Option<String>,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Block until a cold model has loaded instead of failing fast.
    pub wait_for_model: bool,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://router.huggingface.co/hf-inference/models".to_string(),
            model: brief_inference::DEFAULT_MODEL.to_string(),
            api_token: None,
            timeout_secs: 120,
            wait_for_model: true,
        }
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Extraction library.
    pub engine: PdfEngine,

    /// Largest accepted upload in bytes (0 = unlimited).
    pub max_upload_bytes: u64,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            engine: PdfEngine::default(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// Initial widget values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Starting position of the summary length slider (50 - 200).
    pub default_max_length: u32,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            default_max_length: SummaryLength::DEFAULT,
        }
    }
}

impl BriefConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Check values serde cannot check on its own.
    pub fn validate(&self) -> crate::Result<()> {
        if self.summarizer.model.trim().is_empty() {
            return Err(BriefError::Config("summarizer.model must not be empty".to_string()));
        }
        if self.summarizer.timeout_secs == 0 {
            return Err(BriefError::Config("summarizer.timeout_secs must be positive".to_string()));
        }
        self.default_max_length()?;
        Ok(())
    }

    /// The configured slider start as a validated length.
    pub fn default_max_length(&self) -> crate::Result<SummaryLength> {
        SummaryLength::new(self.page.default_max_length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = BriefConfig::default();
        assert_eq!(config.summarizer.model, "facebook/bart-large-cnn");
        assert_eq!(config.page.default_max_length, 130);
        assert_eq!(config.pdf.engine, PdfEngine::Lopdf);
        assert_eq!(config.pdf.max_upload_bytes, 200 * 1024 * 1024);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: BriefConfig =
            serde_json::from_str(r#"{"pdf": {"engine": "pdf-extract"}}"#).unwrap();
        assert_eq!(config.pdf.engine, PdfEngine::PdfExtract);
        assert_eq!(config.pdf.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
        assert_eq!(config.summarizer.timeout_secs, 120);
    }

    #[test]
    fn test_validate_rejects_slider_out_of_range() {
        let mut config = BriefConfig::default();
        config.page.default_max_length = 20;
        assert!(matches!(
            config.validate(),
            Err(BriefError::InvalidSummaryLength { value: 20, .. })
        ));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = BriefConfig::default();
        config.summarizer.model = "sshleifer/distilbart-cnn-12-6".to_string();
        config.save(&path).unwrap();

        let loaded = BriefConfig::from_file(&path).unwrap();
        assert_eq!(loaded.summarizer.model, "sshleifer/distilbart-cnn-12-6");
    }

    #[test]
    fn test_invalid_json_is_invalid_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = BriefConfig::from_file(&path).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }
}
