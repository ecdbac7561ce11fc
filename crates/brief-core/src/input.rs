//! Input resolution and validation.
//!
//! Decides which text, if any, a summarize request will carry: the text of
//! the uploaded PDF in PDF mode, the pasted string verbatim in text mode.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PdfError;
use crate::pdf::PdfTextExtractor;
use crate::session::{Mode, SessionState};

/// Inputs shorter than this many characters are not summarized.
pub const MIN_INPUT_CHARS: usize = 100;

/// A file handed over by the UI layer.
///
/// The bytes are shared, so cloning an upload (or a page holding one) does
/// not copy the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    /// Original file name, if the UI knows it.
    pub name: Option<String>,
    /// Raw file contents.
    pub data: Arc<[u8]>,
}

impl Upload {
    pub fn new(data: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: None,
            data: data.into(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Where the text of a request came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputSource {
    Pdf,
    Text,
}

impl From<Mode> for InputSource {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Pdf => InputSource::Pdf,
            Mode::Text => InputSource::Text,
        }
    }
}

/// Verdict on a candidate input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Validation {
    /// Nothing to summarize.
    NoInput,
    /// Some text, but under [`MIN_INPUT_CHARS`].
    TooShort { chars: usize },
    /// Long enough to send to the engine.
    Ready { chars: usize },
}

/// Resolve the text a request would summarize.
///
/// In PDF mode with no upload the result is empty; that is reported later as
/// missing input, not as an error here. Text mode ignores any upload.
pub fn resolve_input(
    state: &SessionState,
    upload: Option<&Upload>,
    extractor: &dyn PdfTextExtractor,
) -> Result<String, PdfError> {
    match (state.current_mode(), upload) {
        (Mode::Pdf, None) => Ok(String::new()),
        (Mode::Pdf, Some(upload)) if upload.is_empty() => {
            Err(PdfError::Parse("file is empty".to_string()))
        }
        (Mode::Pdf, Some(upload)) => {
            debug!(
                "Extracting text from {} ({} bytes)",
                upload.name.as_deref().unwrap_or("upload"),
                upload.len()
            );
            extractor.extract_text(&upload.data)
        }
        (Mode::Text, _) => Ok(state.pasted_text().to_string()),
    }
}

/// Check whether `text` is long enough to summarize.
pub fn validate_length(text: &str) -> Validation {
    if text.is_empty() {
        return Validation::NoInput;
    }

    let chars = text.chars().count();
    if chars < MIN_INPUT_CHARS {
        Validation::TooShort { chars }
    } else {
        Validation::Ready { chars }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::Result as PdfResult;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;

    struct FixedPages {
        pages: Vec<&'static str>,
        calls: Cell<usize>,
    }

    impl PdfTextExtractor for FixedPages {
        fn extract_pages(&self, _data: &[u8]) -> PdfResult<Vec<String>> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.pages.iter().map(|p| p.to_string()).collect())
        }
    }

    struct Broken;

    impl PdfTextExtractor for Broken {
        fn extract_pages(&self, _data: &[u8]) -> PdfResult<Vec<String>> {
            Err(PdfError::Parse("EOF marker not found".to_string()))
        }
    }

    fn pages(pages: Vec<&'static str>) -> FixedPages {
        FixedPages {
            pages,
            calls: Cell::new(0),
        }
    }

    #[test]
    fn test_pdf_mode_without_upload_is_empty() {
        let state = SessionState::new();
        let text = resolve_input(&state, None, &Broken).unwrap();
        assert_eq!(text, "");
    }

    #[test]
    fn test_pdf_mode_concatenates_pages() {
        let state = SessionState::new();
        let upload = Upload::new(b"%PDF".to_vec()).with_name("notes.pdf");
        let extractor = pages(vec!["one", "", "two"]);

        let text = resolve_input(&state, Some(&upload), &extractor).unwrap();
        assert_eq!(text, "onetwo");
        assert_eq!(extractor.calls.get(), 1);
    }

    #[test]
    fn test_empty_upload_is_a_read_error() {
        let state = SessionState::new();
        let extractor = pages(vec!["never"]);
        let err = resolve_input(&state, Some(&Upload::new(Vec::new())), &extractor).unwrap_err();

        assert_eq!(err.to_string(), "failed to parse PDF: file is empty");
        assert_eq!(extractor.calls.get(), 0);
    }

    #[test]
    fn test_cloned_upload_shares_bytes() {
        let upload = Upload::new(vec![0u8; 1024]).with_name("big.pdf");
        let copy = upload.clone();
        assert!(Arc::ptr_eq(&upload.data, &copy.data));
    }

    #[test]
    fn test_pdf_mode_surfaces_extractor_error() {
        let state = SessionState::new();
        let upload = Upload::new(b"garbage".to_vec());
        let err = resolve_input(&state, Some(&upload), &Broken).unwrap_err();
        assert_eq!(err.to_string(), "failed to parse PDF: EOF marker not found");
    }

    #[test]
    fn test_text_mode_uses_pasted_text_verbatim() {
        let mut state = SessionState::new();
        state.toggle();
        state.set_pasted_text("  spaced\ttext \n");

        let upload = Upload::new(b"%PDF".to_vec());
        let extractor = pages(vec!["ignored"]);
        let text = resolve_input(&state, Some(&upload), &extractor).unwrap();

        assert_eq!(text, "  spaced\ttext \n");
        assert_eq!(extractor.calls.get(), 0);
    }

    #[test]
    fn test_validate_length() {
        assert_eq!(validate_length(""), Validation::NoInput);
        assert_eq!(validate_length("Hi"), Validation::TooShort { chars: 2 });
        assert_eq!(
            validate_length(&"a".repeat(99)),
            Validation::TooShort { chars: 99 }
        );
        assert_eq!(
            validate_length(&"a".repeat(100)),
            Validation::Ready { chars: 100 }
        );
    }

    #[test]
    fn test_whitespace_only_is_too_short_not_missing() {
        assert_eq!(validate_length("   "), Validation::TooShort { chars: 3 });
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 60 two-byte characters: 120 bytes but only 60 chars.
        let text = "é".repeat(60);
        assert_eq!(text.len(), 120);
        assert_eq!(validate_length(&text), Validation::TooShort { chars: 60 });
    }
}
