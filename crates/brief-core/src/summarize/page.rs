//! One user's view of the summarizer.

use std::sync::Arc;

use brief_inference::{InferenceError, SummarizationBackend};
use tracing::debug;

use super::{execute, prepare_request, Outcome, SummaryLength};
use crate::input::Upload;
use crate::models::config::BriefConfig;
use crate::pdf::{PdfEngine, DEFAULT_MAX_UPLOAD_BYTES};
use crate::session::{Mode, SessionState, Transition, ViewFlags};

/// Creates the engine on first use.
pub type EngineFactory<B> = Arc<dyn Fn() -> brief_inference::Result<B> + Send + Sync>;

/// Session state plus the widget values a front end keeps between
/// interactions: the current upload and the length slider.
///
/// The engine is built lazily and then reused for the rest of the session.
#[derive(Clone)]
pub struct Page<B> {
    state: SessionState,
    upload: Option<Upload>,
    max_length: SummaryLength,
    pdf_engine: PdfEngine,
    max_upload_bytes: u64,
    engine: Option<B>,
    factory: Option<EngineFactory<B>>,
}

impl<B: SummarizationBackend> Page<B> {
    fn empty() -> Self {
        Self {
            state: SessionState::new(),
            upload: None,
            max_length: SummaryLength::default(),
            pdf_engine: PdfEngine::default(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            engine: None,
            factory: None,
        }
    }

    /// Page backed by an already constructed engine.
    pub fn with_engine(engine: B) -> Self {
        Self {
            engine: Some(engine),
            ..Self::empty()
        }
    }

    /// Page that builds its engine on the first summarize request.
    pub fn lazy<F>(factory: F) -> Self
    where
        F: Fn() -> brief_inference::Result<B> + Send + Sync + 'static,
    {
        Self {
            factory: Some(Arc::new(factory)),
            ..Self::empty()
        }
    }

    /// Apply PDF settings and the slider start from `config`.
    pub fn configured(mut self, config: &BriefConfig) -> crate::Result<Self> {
        self.pdf_engine = config.pdf.engine;
        self.max_upload_bytes = config.pdf.max_upload_bytes;
        self.max_length = config.default_max_length()?;
        Ok(self)
    }

    pub fn mode(&self) -> Mode {
        self.state.current_mode()
    }

    pub fn view(&self) -> ViewFlags {
        self.state.view()
    }

    /// The "Click to paste text here" button.
    pub fn toggle_mode(&mut self) -> Transition {
        self.state.toggle()
    }

    pub fn set_mode(&mut self, mode: Mode) -> Transition {
        self.state.set_mode(mode)
    }

    /// A file was dropped on the uploader.
    pub fn upload(&mut self, upload: Upload) -> Transition {
        debug!("Upload received: {} bytes", upload.len());
        self.upload = Some(upload);
        self.state.upload_detected()
    }

    /// Remove the current upload, if any.
    pub fn remove_upload(&mut self) -> Option<Upload> {
        self.upload.take()
    }

    pub fn current_upload(&self) -> Option<&Upload> {
        self.upload.as_ref()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.state.set_pasted_text(text);
    }

    pub fn text(&self) -> &str {
        self.state.pasted_text()
    }

    pub fn set_max_length(&mut self, max_length: SummaryLength) {
        self.max_length = max_length;
    }

    pub fn max_length(&self) -> SummaryLength {
        self.max_length
    }

    /// The "Clear" button: back to PDF mode. Pasted text, upload and slider
    /// keep their values.
    pub fn clear(&mut self) -> Transition {
        self.state.clear()
    }

    /// The "Summarize Now" button.
    pub async fn summarize_now(&mut self) -> Outcome {
        let extractor = self.pdf_engine.extractor(self.max_upload_bytes);
        let request = match prepare_request(
            &self.state,
            self.upload.as_ref(),
            self.max_length,
            extractor.as_ref(),
        ) {
            Ok(request) => request,
            Err(outcome) => return outcome,
        };

        match self.engine() {
            Ok(engine) => execute(request, engine).await,
            Err(e) => Outcome::SummarizationFailed(e.to_string()),
        }
    }

    fn engine(&mut self) -> brief_inference::Result<&B> {
        if self.engine.is_none() {
            let factory = self.factory.as_ref().ok_or_else(|| {
                InferenceError::Config("no summarization engine configured".to_string())
            })?;
            debug!("Loading summarization engine");
            self.engine = Some(factory()?);
        }
        self.engine
            .as_ref()
            .ok_or_else(|| InferenceError::Config("no summarization engine configured".to_string()))
    }
}
