//! Error types for the inference layer.

use thiserror::Error;

/// Errors that can occur while asking a model for a summary.
#[derive(Error, Debug)]
pub enum InferenceError {
    /// The request never produced a response (connect, timeout, TLS, ...).
    #[error("request failed: {0}")]
    Request(String),

    /// The inference service answered with an error.
    #[error("inference API returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The response body did not have the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The model returned no summary text.
    #[error("model returned an empty summary")]
    EmptySummary,

    /// Backend could not be constructed from the given settings.
    #[error("backend configuration error: {0}")]
    Config(String),
}
