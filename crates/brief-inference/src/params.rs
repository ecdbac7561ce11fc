//! Decoding parameters passed along with every summarization request.

use serde::{Deserialize, Serialize};

/// Length bounds and decoding mode for one summary.
///
/// Field names match the generation keyword arguments understood by
/// hosted summarization pipelines, so the struct serializes directly into
/// the `parameters` object of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Upper bound on the summary length, in model tokens.
    pub max_length: u32,
    /// Lower bound on the summary length, in model tokens.
    pub min_length: u32,
    /// Sample instead of decoding deterministically.
    pub do_sample: bool,
}

impl GenerationParams {
    /// Deterministic decoding with the given bounds.
    pub fn deterministic(max_length: u32, min_length: u32) -> Self {
        Self {
            max_length,
            min_length,
            do_sample: false,
        }
    }
}
