//! Summarization engine abstraction layer for brief.
//!
//! This crate provides a unified interface for producing abstractive
//! summaries from pre-trained models, independent of where the model runs:
//! - `hf` talks to the Hugging Face Inference API on native platforms
//! - browser builds plug in their own engine (see `brief-wasm`)

mod backend;
mod error;
mod params;

pub use backend::SummarizationBackend;
pub use error::InferenceError;
pub use params::GenerationParams;

#[cfg(feature = "native")]
pub use backend::hf::{HfInferenceBackend, HfInferenceBackendBuilder};

/// Model used when nothing else is configured.
pub const DEFAULT_MODEL: &str = "facebook/bart-large-cnn";

/// Result type for inference operations.
pub type Result<T> = std::result::Result<T, InferenceError>;
