//! WASM bindings for the brief summarizer page.
//!
//! The browser supplies the summarization engine as a JS function
//! `(text, {max_length, min_length, do_sample}) => Promise<string>`; everything
//! else (mode switching, PDF extraction, validation, messages) runs in Rust.

use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{future_to_promise, JsFuture};

use brief_core::input::validate_length as check_length;
use brief_core::{
    GenerationParams, InferenceError, Mode, Page, SummarizationBackend, SummaryLength,
    Transition, Upload, ViewFlags,
};

/// Page title.
pub const TITLE: &str = "PDF/Text Summarizer";

/// Page subtitle.
pub const SUBTITLE: &str = "Upload a PDF or paste text to get a concise summary.";

const DEFAULT_MODEL: &str = "browser";

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[wasm_bindgen]
pub fn title() -> String {
    TITLE.to_string()
}

#[wasm_bindgen]
pub fn subtitle() -> String {
    SUBTITLE.to_string()
}

#[derive(Serialize)]
struct Labels {
    title: &'static str,
    subtitle: &'static str,
    toggle: &'static str,
    text_area: &'static str,
    clear: &'static str,
    summarize: &'static str,
    slider_min: u32,
    slider_max: u32,
    slider_default: u32,
}

/// Widget captions and slider bounds for rendering the page.
#[wasm_bindgen]
pub fn labels() -> Result<JsValue, JsValue> {
    to_js(&Labels {
        title: TITLE,
        subtitle: SUBTITLE,
        toggle: "Click to paste text here",
        text_area: "Paste any article, essay, or research paper",
        clear: "Clear",
        summarize: "Summarize Now",
        slider_min: SummaryLength::MIN,
        slider_max: SummaryLength::MAX,
        slider_default: SummaryLength::DEFAULT,
    })
}

/// Check a candidate input against the minimum length.
///
/// Returns `"no_input"`, `{too_short: {chars}}` or `{ready: {chars}}`.
#[wasm_bindgen]
pub fn validate_length(text: &str) -> Result<JsValue, JsValue> {
    to_js(&check_length(text))
}

/// Summarization engine backed by a JS callback.
#[derive(Clone)]
struct JsBackend {
    callback: js_sys::Function,
    model: String,
}

impl SummarizationBackend for JsBackend {
    async fn summarize(
        &self,
        text: &str,
        params: &GenerationParams,
    ) -> Result<String, InferenceError> {
        let params = serde_wasm_bindgen::to_value(params)
            .map_err(|e| InferenceError::Request(e.to_string()))?;
        let returned = self
            .callback
            .call2(&JsValue::NULL, &JsValue::from_str(text), &params)
            .map_err(|e| InferenceError::Request(describe(&e)))?;

        // Plain return values are accepted too.
        let resolved = JsFuture::from(js_sys::Promise::resolve(&returned))
            .await
            .map_err(|e| InferenceError::Request(describe(&e)))?;

        let summary = summary_text(resolved)?;
        if summary.trim().is_empty() {
            return Err(InferenceError::EmptySummary);
        }
        Ok(summary)
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

/// Read the callback's result: a string, or the hosted API's
/// `[{"summary_text": ...}]` shape passed through unchanged.
fn summary_text(value: JsValue) -> Result<String, InferenceError> {
    if let Some(text) = value.as_string() {
        return Ok(text);
    }

    let json: serde_json::Value = serde_wasm_bindgen::from_value(value)
        .map_err(|e| InferenceError::InvalidResponse(e.to_string()))?;
    let entry = match &json {
        serde_json::Value::Array(items) => items.first().ok_or(InferenceError::EmptySummary)?,
        other => other,
    };
    entry
        .get("summary_text")
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            InferenceError::InvalidResponse(format!("expected a summary string, got {json}"))
        })
}

fn describe(error: &JsValue) -> String {
    if let Some(message) = error.as_string() {
        return message;
    }
    match error.dyn_ref::<js_sys::Error>() {
        Some(err) => String::from(err.message()),
        None => format!("{:?}", error),
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[derive(Serialize)]
struct TransitionJs {
    from: Mode,
    to: Mode,
    changed: bool,
    view: ViewFlags,
}

impl From<Transition> for TransitionJs {
    fn from(t: Transition) -> Self {
        Self {
            from: t.from,
            to: t.to,
            changed: t.changed(),
            view: t.view,
        }
    }
}

/// The summarizer page, driven by browser widgets.
#[wasm_bindgen]
pub struct SummarizerPage {
    page: Page<JsBackend>,
}

#[wasm_bindgen]
impl SummarizerPage {
    /// Create a page whose "Summarize Now" calls `engine`.
    #[wasm_bindgen(constructor)]
    pub fn new(engine: js_sys::Function, model: Option<String>) -> Self {
        let backend = JsBackend {
            callback: engine,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        };
        Self {
            page: Page::with_engine(backend),
        }
    }

    /// Current mode, `"pdf"` or `"text"`.
    #[wasm_bindgen]
    pub fn mode(&self) -> String {
        self.page.mode().to_string()
    }

    /// Widget visibility: `{uploader_disabled, text_area_visible}`.
    #[wasm_bindgen]
    pub fn view(&self) -> Result<JsValue, JsValue> {
        to_js(&self.page.view())
    }

    /// The "Click to paste text here" button.
    #[wasm_bindgen]
    pub fn toggle_mode(&mut self) -> Result<JsValue, JsValue> {
        to_js(&TransitionJs::from(self.page.toggle_mode()))
    }

    /// A file was chosen in the uploader.
    #[wasm_bindgen]
    pub fn upload_pdf(&mut self, bytes: &[u8], name: Option<String>) -> Result<JsValue, JsValue> {
        let mut upload = Upload::new(bytes);
        if let Some(name) = name {
            upload = upload.with_name(name);
        }
        to_js(&TransitionJs::from(self.page.upload(upload)))
    }

    /// Returns whether there was an upload to remove.
    #[wasm_bindgen]
    pub fn remove_upload(&mut self) -> bool {
        self.page.remove_upload().is_some()
    }

    #[wasm_bindgen]
    pub fn has_upload(&self) -> bool {
        self.page.current_upload().is_some()
    }

    #[wasm_bindgen]
    pub fn set_text(&mut self, text: String) {
        self.page.set_text(text);
    }

    #[wasm_bindgen]
    pub fn text(&self) -> String {
        self.page.text().to_string()
    }

    /// Move the length slider. Values outside 50..=200 are rejected.
    #[wasm_bindgen]
    pub fn set_max_length(&mut self, value: u32) -> Result<(), JsValue> {
        let length = SummaryLength::new(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.page.set_max_length(length);
        Ok(())
    }

    #[wasm_bindgen]
    pub fn max_length(&self) -> u32 {
        self.page.max_length().get()
    }

    /// The "Clear" button.
    #[wasm_bindgen]
    pub fn clear(&mut self) -> Result<JsValue, JsValue> {
        to_js(&TransitionJs::from(self.page.clear()))
    }

    /// The "Summarize Now" button.
    ///
    /// Resolves to `{severity, message, summary?}`; never rejects for user
    /// errors, which are carried in `severity`. The request runs on a copy of
    /// the page whose upload shares the original's bytes.
    #[wasm_bindgen]
    pub fn summarize_now(&self) -> js_sys::Promise {
        let mut page = self.page.clone();
        future_to_promise(async move {
            let outcome = page.summarize_now().await;
            if !outcome.is_success() {
                web_sys::console::warn_1(&JsValue::from_str(&outcome.message()));
            }
            to_js(&outcome.report())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brief_core::Validation;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn engine(body: &str) -> js_sys::Function {
        js_sys::Function::new_with_args("text, params", body)
    }

    fn article() -> String {
        "Researchers found that regular sleep improves memory consolidation in adults. ".repeat(4)
    }

    async fn report(page: &SummarizerPage) -> serde_json::Value {
        let value = JsFuture::from(page.summarize_now()).await.unwrap();
        serde_wasm_bindgen::from_value(value).unwrap()
    }

    #[wasm_bindgen_test]
    fn test_title() {
        assert_eq!(title(), "PDF/Text Summarizer");
        assert!(!version().is_empty());
    }

    #[wasm_bindgen_test]
    fn test_labels() {
        let labels: serde_json::Value = serde_wasm_bindgen::from_value(labels().unwrap()).unwrap();
        assert_eq!(labels["toggle"], "Click to paste text here");
        assert_eq!(labels["slider_min"].as_f64(), Some(50.0));
        assert_eq!(labels["slider_max"].as_f64(), Some(200.0));
        assert_eq!(labels["slider_default"].as_f64(), Some(130.0));
    }

    #[wasm_bindgen_test]
    fn test_validate_length() {
        let short: Validation = serde_wasm_bindgen::from_value(validate_length("Hi").unwrap()).unwrap();
        assert_eq!(short, Validation::TooShort { chars: 2 });

        let empty: Validation = serde_wasm_bindgen::from_value(validate_length("").unwrap()).unwrap();
        assert_eq!(empty, Validation::NoInput);
    }

    #[wasm_bindgen_test]
    fn test_toggle_and_clear() {
        let mut page = SummarizerPage::new(engine("return 'unused';"), None);
        assert_eq!(page.mode(), "pdf");

        page.toggle_mode().unwrap();
        assert_eq!(page.mode(), "text");
        page.set_text("kept".to_string());

        page.clear().unwrap();
        assert_eq!(page.mode(), "pdf");
        assert_eq!(page.text(), "kept");
    }

    #[wasm_bindgen_test]
    fn test_slider_bounds() {
        let mut page = SummarizerPage::new(engine("return 'unused';"), None);
        assert_eq!(page.max_length(), 130);
        assert!(page.set_max_length(201).is_err());
        assert!(page.set_max_length(75).is_ok());
        assert_eq!(page.max_length(), 75);
    }

    #[wasm_bindgen_test]
    async fn test_summarize_pasted_text() {
        let mut page = SummarizerPage::new(
            engine("return Promise.resolve('max ' + params.max_length + ' min ' + params.min_length);"),
            None,
        );
        page.toggle_mode().unwrap();
        page.set_text(article());

        let report = report(&page).await;
        assert_eq!(report["severity"], "success");
        assert_eq!(report["message"], "Summary:");
        assert_eq!(report["summary"]["text"], "max 130 min 30");
        assert_eq!(report["summary"]["model"], "browser");
    }

    #[wasm_bindgen_test]
    async fn test_hosted_response_shape_is_accepted() {
        let mut page = SummarizerPage::new(
            engine("return Promise.resolve([{ summary_text: 'Sleep helps memory.' }]);"),
            Some("facebook/bart-large-cnn".to_string()),
        );
        page.toggle_mode().unwrap();
        page.set_text(article());

        let report = report(&page).await;
        assert_eq!(report["summary"]["text"], "Sleep helps memory.");
    }

    #[wasm_bindgen_test]
    async fn test_rejected_promise_is_reported() {
        let mut page = SummarizerPage::new(
            engine("return Promise.reject(new Error('model offline'));"),
            None,
        );
        page.toggle_mode().unwrap();
        page.set_text(article());

        let report = report(&page).await;
        assert_eq!(report["severity"], "error");
        assert_eq!(
            report["message"],
            "An error occurred during summarization: request failed: model offline"
        );
    }

    #[wasm_bindgen_test]
    async fn test_corrupt_upload() {
        let mut page = SummarizerPage::new(engine("return 'unused';"), None);
        page.toggle_mode().unwrap();
        page.upload_pdf(b"not a pdf", Some("x.pdf".to_string())).unwrap();
        assert_eq!(page.mode(), "pdf");

        let report = report(&page).await;
        let message = report["message"].as_str().unwrap();
        assert!(message.starts_with("Error reading PDF: "));
    }
}
