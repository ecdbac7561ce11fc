//! User-facing results of a summarize request.

use serde::{Deserialize, Serialize};

use crate::input::InputSource;

/// How an outcome is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Warning,
    Error,
}

/// A generated summary and the request it answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Summary text as returned by the engine.
    pub text: String,
    /// Where the input text came from.
    pub source: InputSource,
    /// Length of the input, in characters.
    pub input_chars: usize,
    pub max_length: u32,
    pub min_length: u32,
    /// Model that produced the summary.
    pub model: String,
}

/// Result of pressing "Summarize Now".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The engine produced a summary.
    Success(Summary),
    /// No text at all: no upload in PDF mode, or an empty paste.
    NoInputProvided,
    /// Text under the minimum length.
    InputTooShort,
    /// The upload could not be read. Nothing further runs for this request.
    PdfExtractionFailed(String),
    /// The engine failed. The user may retry.
    SummarizationFailed(String),
}

/// Flattened form of an [`Outcome`] for JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeReport {
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Summary>,
}

impl Outcome {
    pub fn severity(&self) -> Severity {
        match self {
            Outcome::Success(_) => Severity::Success,
            Outcome::NoInputProvided => Severity::Warning,
            Outcome::InputTooShort
            | Outcome::PdfExtractionFailed(_)
            | Outcome::SummarizationFailed(_) => Severity::Error,
        }
    }

    /// Message shown to the user.
    pub fn message(&self) -> String {
        match self {
            Outcome::Success(_) => "Summary:".to_string(),
            Outcome::NoInputProvided => {
                "Please provide text either by uploading a PDF or pasting content.".to_string()
            }
            Outcome::InputTooShort => {
                "Text is too short for summarization (min 100 characters recommended).".to_string()
            }
            Outcome::PdfExtractionFailed(detail) => format!("Error reading PDF: {detail}"),
            Outcome::SummarizationFailed(detail) => {
                format!("An error occurred during summarization: {detail}")
            }
        }
    }

    /// Whether this outcome stopped the request before the input checks.
    pub fn halted(&self) -> bool {
        matches!(self, Outcome::PdfExtractionFailed(_))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn summary(&self) -> Option<&Summary> {
        match self {
            Outcome::Success(summary) => Some(summary),
            _ => None,
        }
    }

    pub fn report(&self) -> OutcomeReport {
        OutcomeReport {
            severity: self.severity(),
            message: self.message(),
            summary: self.summary().cloned(),
        }
    }
}
