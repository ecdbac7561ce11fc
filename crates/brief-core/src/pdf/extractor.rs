//! PDF text extraction using lopdf and pdf-extract.

use std::panic::{self, AssertUnwindSafe};

use lopdf::Document;
use tracing::{debug, trace};

use super::{ensure_within_limit, PdfTextExtractor, Result, DEFAULT_MAX_UPLOAD_BYTES};
use crate::error::PdfError;

/// Page-by-page extractor built on lopdf.
#[derive(Debug, Clone)]
pub struct LopdfExtractor {
    max_bytes: u64,
}

impl LopdfExtractor {
    /// Create a new extractor with the default upload limit.
    pub fn new() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    /// Set the upload size limit (0 disables it).
    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    fn load(data: &[u8]) -> Result<Document> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;
        unlock(&mut doc)?;
        Ok(doc)
    }
}

/// Open documents protected only by an empty user password.
fn unlock(doc: &mut Document) -> Result<()> {
    if !doc.is_encrypted() {
        return Ok(());
    }
    if doc.decrypt("").is_err() {
        return Err(PdfError::Encrypted);
    }
    debug!("Decrypted PDF with empty password");
    Ok(())
}

impl Default for LopdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfTextExtractor for LopdfExtractor {
    fn extract_pages(&self, data: &[u8]) -> Result<Vec<String>> {
        ensure_within_limit(data, self.max_bytes)?;
        let doc = Self::load(data)?;

        // get_pages() is keyed by page number, so iteration is in page order.
        let pages = doc.get_pages();
        let mut texts = Vec::with_capacity(pages.len());
        for &number in pages.keys() {
            match doc.extract_text(&[number]) {
                Ok(text) => texts.push(text),
                Err(e) => {
                    trace!("No text on page {}: {}", number, e);
                    texts.push(String::new());
                }
            }
        }

        debug!(
            "Extracted {} pages, {} chars",
            texts.len(),
            texts.iter().map(|t| t.chars().count()).sum::<usize>()
        );
        Ok(texts)
    }
}

/// Extractor built on pdf-extract.
///
/// pdf-extract handles more font encodings than lopdf but can panic on
/// malformed input; panics are reported as parse errors.
#[derive(Debug, Clone)]
pub struct PdfExtractExtractor {
    max_bytes: u64,
}

impl PdfExtractExtractor {
    pub fn new() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    /// Set the upload size limit (0 disables it).
    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }
}

impl Default for PdfExtractExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfTextExtractor for PdfExtractExtractor {
    fn extract_pages(&self, data: &[u8]) -> Result<Vec<String>> {
        ensure_within_limit(data, self.max_bytes)?;

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(data)
        }));

        match result {
            Ok(Ok(pages)) => {
                debug!("Extracted {} pages", pages.len());
                Ok(pages)
            }
            Ok(Err(e)) => Err(PdfError::TextExtraction(e.to_string())),
            Err(_) => Err(PdfError::Parse("malformed document".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::test_support::build_pdf;
    use lopdf::dictionary;

    #[test]
    fn test_lopdf_extracts_pages_in_order() {
        let pdf = build_pdf(&[Some("First page"), None, Some("Third page")]);
        let pages = LopdfExtractor::new().extract_pages(&pdf).unwrap();

        assert_eq!(pages.len(), 3);
        assert!(pages[0].contains("First page"));
        assert!(pages[1].trim().is_empty());
        assert!(pages[2].contains("Third page"));

        let text = LopdfExtractor::new().extract_text(&pdf).unwrap();
        let first = text.find("First page").unwrap();
        let third = text.find("Third page").unwrap();
        assert!(first < third);
    }

    #[test]
    fn test_lopdf_rejects_garbage() {
        let err = LopdfExtractor::new()
            .extract_pages(b"this is not a pdf at all")
            .unwrap_err();
        assert!(matches!(err, PdfError::Parse(_)));
    }

    #[test]
    fn test_pdf_extract_reads_pages_in_order() {
        let pdf = build_pdf(&[Some("Alpha"), None, Some("Gamma")]);
        let pages = PdfExtractExtractor::new().extract_pages(&pdf).unwrap();

        assert_eq!(pages.len(), 3);
        assert!(pages[0].contains("Alpha"));
        assert!(pages[1].trim().is_empty());
        assert!(pages[2].contains("Gamma"));

        let text = PdfExtractExtractor::new().extract_text(&pdf).unwrap();
        assert!(text.find("Alpha").unwrap() < text.find("Gamma").unwrap());
    }

    #[test]
    fn test_unlock_leaves_plain_documents_alone() {
        let mut doc = Document::load_mem(&build_pdf(&[Some("Plain")])).unwrap();
        assert!(unlock(&mut doc).is_ok());
    }

    #[test]
    fn test_unreadable_encryption_is_reported() {
        let mut doc = Document::load_mem(&build_pdf(&[Some("Secret")])).unwrap();
        // Standard handler with no keys: the empty password cannot open it.
        let encrypt_id = doc.add_object(dictionary! {
            "Filter" => "Standard",
            "V" => 2,
            "R" => 3,
            "Length" => 128,
            "P" => -4,
        });
        doc.trailer.set("Encrypt", encrypt_id);
        assert!(doc.is_encrypted());
        assert!(matches!(unlock(&mut doc), Err(PdfError::Encrypted)));
    }

    #[test]
    fn test_pdf_extract_rejects_garbage() {
        let result = PdfExtractExtractor::new().extract_pages(b"%PDF-1.4 truncated");
        assert!(result.is_err());
    }

    #[test]
    fn test_size_limit_checked_before_parsing() {
        let err = LopdfExtractor::new()
            .with_max_bytes(4)
            .extract_pages(b"not a pdf either")
            .unwrap_err();
        assert!(matches!(err, PdfError::TooLarge { size: 16, limit: 4 }));
    }
}
