//! Error types for the brief-core library.

use thiserror::Error;

/// Main error type for the brief library.
#[derive(Error, Debug)]
pub enum BriefError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Error from the summarization engine.
    #[error("inference error: {0}")]
    Inference(#[from] brief_inference::InferenceError),

    /// Summary length outside the slider range.
    #[error("summary length {value} is outside {min}..={max}")]
    InvalidSummaryLength { value: u32, min: u32, max: u32 },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The upload exceeds the configured size limit.
    #[error("file is {size} bytes, limit is {limit} bytes")]
    TooLarge { size: u64, limit: u64 },
}

/// Result type for the brief library.
pub type Result<T> = std::result::Result<T, BriefError>;
