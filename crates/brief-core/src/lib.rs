//! Core library for the brief summarizer.
//!
//! This crate provides:
//! - Input mode tracking (PDF upload vs pasted text) as explicit session state
//! - PDF text extraction (lopdf and pdf-extract)
//! - Input validation and the summarize request pipeline
//! - Configuration shared by the CLI and browser front ends

pub mod error;
pub mod input;
pub mod models;
pub mod pdf;
pub mod session;
pub mod summarize;

pub use error::{BriefError, PdfError, Result};
pub use input::{InputSource, Upload, Validation};
pub use models::config::BriefConfig;
pub use pdf::{LopdfExtractor, PdfEngine, PdfExtractExtractor, PdfTextExtractor};
pub use session::{Mode, SessionState, Transition, ViewFlags};
pub use summarize::{Outcome, Page, Severity, Summary, SummaryLength, SummaryRequest};

/// Re-export inference types.
pub use brief_inference::{GenerationParams, InferenceError, SummarizationBackend};

#[cfg(feature = "native")]
pub use brief_inference::HfInferenceBackend;
