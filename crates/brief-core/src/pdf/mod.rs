//! PDF processing module.

mod extractor;

pub use extractor::{LopdfExtractor, PdfExtractExtractor};

use serde::{Deserialize, Serialize};

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Default upload limit (200 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 200 * 1024 * 1024;

/// Trait for PDF text extraction implementations.
pub trait PdfTextExtractor {
    /// Extract the text of every page, in page order.
    ///
    /// Pages without extractable text yield an empty string rather than an
    /// error; only an unreadable document fails.
    fn extract_pages(&self, data: &[u8]) -> Result<Vec<String>>;

    /// Extract the whole document as one string.
    fn extract_text(&self, data: &[u8]) -> Result<String> {
        Ok(join_pages(&self.extract_pages(data)?))
    }
}

/// Which library does the extraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PdfEngine {
    #[default]
    Lopdf,
    PdfExtract,
}

impl PdfEngine {
    /// Build an extractor for this engine.
    pub fn extractor(self, max_upload_bytes: u64) -> Box<dyn PdfTextExtractor> {
        match self {
            PdfEngine::Lopdf => Box::new(LopdfExtractor::new().with_max_bytes(max_upload_bytes)),
            PdfEngine::PdfExtract => {
                Box::new(PdfExtractExtractor::new().with_max_bytes(max_upload_bytes))
            }
        }
    }
}

/// Concatenate page texts, skipping empty pages. No separator is inserted.
pub fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
    pages
        .iter()
        .map(AsRef::as_ref)
        .filter(|page| !page.is_empty())
        .collect()
}

fn ensure_within_limit(data: &[u8], limit: u64) -> Result<()> {
    let size = data.len() as u64;
    if limit > 0 && size > limit {
        return Err(PdfError::TooLarge { size, limit });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_join_pages_skips_empty_without_separator() {
        let pages = ["Intro. ", "", "Body text.", ""];
        assert_eq!(join_pages(&pages), "Intro. Body text.");
    }

    #[test]
    fn test_join_pages_all_empty() {
        let pages: [String; 2] = [String::new(), String::new()];
        assert_eq!(join_pages(&pages), "");
    }

    #[test]
    fn test_size_limit() {
        assert!(ensure_within_limit(&[0u8; 10], 10).is_ok());
        assert!(matches!(
            ensure_within_limit(&[0u8; 11], 10),
            Err(PdfError::TooLarge { size: 11, limit: 10 })
        ));
        // Zero disables the check.
        assert!(ensure_within_limit(&[0u8; 11], 0).is_ok());
    }

    #[test]
    fn test_engine_serde_names() {
        assert_eq!(serde_json::to_string(&PdfEngine::PdfExtract).unwrap(), "\"pdf-extract\"");
        assert_eq!(
            serde_json::from_str::<PdfEngine>("\"lopdf\"").unwrap(),
            PdfEngine::Lopdf
        );
    }
}
