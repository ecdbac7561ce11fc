//! Summarization backend implementations.

#[cfg(feature = "native")]
pub mod hf;

use std::future::Future;

use crate::{GenerationParams, Result};

/// Trait for summarization engines.
///
/// This trait abstracts over where the pre-trained model runs, allowing the
/// same request pipeline to call a hosted API from the CLI and a
/// JavaScript-provided engine in the browser. The returned future carries no
/// `Send` bound so browser promises can implement it.
pub trait SummarizationBackend {
    /// Summarize `text` within the bounds given by `params`.
    ///
    /// # Returns
    /// The generated summary, or the engine's failure reason
    fn summarize(
        &self,
        text: &str,
        params: &GenerationParams,
    ) -> impl Future<Output = Result<String>>;

    /// Identifier of the model behind this backend.
    fn model_id(&self) -> &str;
}
