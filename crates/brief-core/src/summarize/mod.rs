//! Summarize request pipeline.
//!
//! A request is resolved and validated first ([`prepare_request`]); only a
//! request that passes reaches the engine ([`execute`]). Every path ends in
//! an [`Outcome`], so a failed request never tears down the session.

mod outcome;
mod page;

pub use outcome::{Outcome, OutcomeReport, Severity, Summary};
pub use page::{EngineFactory, Page};

use std::fmt;

use brief_inference::{GenerationParams, SummarizationBackend};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::BriefError;
use crate::input::{resolve_input, validate_length, InputSource, Upload, Validation};
use crate::pdf::PdfTextExtractor;
use crate::session::SessionState;

/// Lower bound on summary length handed to the engine.
pub const MIN_SUMMARY_TOKENS: u32 = 30;

/// Upper summary length chosen on the length slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct SummaryLength(u32);

impl SummaryLength {
    pub const MIN: u32 = 50;
    pub const MAX: u32 = 200;
    pub const DEFAULT: u32 = 130;

    pub fn new(value: u32) -> crate::Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(BriefError::InvalidSummaryLength {
                value,
                min: Self::MIN,
                max: Self::MAX,
            })
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for SummaryLength {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl TryFrom<u32> for SummaryLength {
    type Error = BriefError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SummaryLength> for u32 {
    fn from(length: SummaryLength) -> Self {
        length.0
    }
}

impl fmt::Display for SummaryLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A validated request, ready for the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRequest {
    pub text: String,
    pub source: InputSource,
    pub input_chars: usize,
    pub max_length: SummaryLength,
    pub min_length: u32,
}

impl SummaryRequest {
    /// Generation parameters: slider bounds, deterministic decoding.
    pub fn params(&self) -> GenerationParams {
        GenerationParams::deterministic(self.max_length.get(), self.min_length)
    }
}

/// Resolve and validate the input for one request.
///
/// Returns the terminal [`Outcome`] when the request must stop before the
/// engine: unreadable upload, no text, or text under the minimum length.
pub fn prepare_request(
    state: &SessionState,
    upload: Option<&Upload>,
    max_length: SummaryLength,
    extractor: &dyn PdfTextExtractor,
) -> Result<SummaryRequest, Outcome> {
    let text = resolve_input(state, upload, extractor).map_err(|e| {
        warn!("PDF extraction failed: {}", e);
        Outcome::PdfExtractionFailed(e.to_string())
    })?;

    match validate_length(&text) {
        Validation::NoInput => Err(Outcome::NoInputProvided),
        Validation::TooShort { chars } => {
            debug!("Input too short: {} chars", chars);
            Err(Outcome::InputTooShort)
        }
        Validation::Ready { chars } => Ok(SummaryRequest {
            text,
            source: state.current_mode().into(),
            input_chars: chars,
            max_length,
            min_length: MIN_SUMMARY_TOKENS,
        }),
    }
}

/// Send a validated request to the engine.
pub async fn execute<B: SummarizationBackend>(request: SummaryRequest, engine: &B) -> Outcome {
    let params = request.params();
    info!(
        "Summarizing {} chars from {:?} with {}",
        request.input_chars,
        request.source,
        engine.model_id()
    );

    match engine.summarize(&request.text, &params).await {
        Ok(text) => Outcome::Success(Summary {
            text,
            source: request.source,
            input_chars: request.input_chars,
            max_length: params.max_length,
            min_length: params.min_length,
            model: engine.model_id().to_string(),
        }),
        Err(e) => {
            warn!("Summarization failed: {}", e);
            Outcome::SummarizationFailed(e.to_string())
        }
    }
}

/// Handle a "Summarize Now" press end to end.
pub async fn summarize_now<B: SummarizationBackend>(
    state: &SessionState,
    upload: Option<&Upload>,
    max_length: SummaryLength,
    extractor: &dyn PdfTextExtractor,
    engine: &B,
) -> Outcome {
    match prepare_request(state, upload, max_length, extractor) {
        Ok(request) => execute(request, engine).await,
        Err(outcome) => outcome,
    }
}
