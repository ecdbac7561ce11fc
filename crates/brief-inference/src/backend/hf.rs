//! Hugging Face Inference API backend for native platforms.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::InferenceError;
use crate::{GenerationParams, Result, SummarizationBackend, DEFAULT_MODEL};

/// Default base URL for hosted inference.
pub const DEFAULT_ENDPOINT: &str = "https://router.huggingface.co/hf-inference/models";

/// Backend calling a hosted summarization pipeline over HTTP.
#[derive(Debug, Clone)]
pub struct HfInferenceBackend {
    client: reqwest::Client,
    url: String,
    model: String,
    api_token: Option<String>,
    wait_for_model: bool,
}

/// Builder for [`HfInferenceBackend`].
#[derive(Debug, Clone)]
pub struct HfInferenceBackendBuilder {
    endpoint: String,
    model: String,
    api_token: Option<String>,
    timeout: Duration,
    wait_for_model: bool,
}

#[derive(Serialize)]
struct SummarizationRequest<'a> {
    inputs: &'a str,
    parameters: &'a GenerationParams,
    options: RequestOptions,
}

#[derive(Serialize)]
struct RequestOptions {
    wait_for_model: bool,
}

#[derive(Deserialize)]
struct SummaryItem {
    summary_text: String,
}

#[derive(Deserialize)]
struct ApiError {
    error: String,
}

impl HfInferenceBackendBuilder {
    /// Set the base URL; the model id is appended to it.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the model id (e.g. `facebook/bart-large-cnn`).
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the bearer token sent with each request.
    pub fn api_token(mut self, token: Option<String>) -> Self {
        self.api_token = token.filter(|t| !t.trim().is_empty());
        self
    }

    /// Set the overall request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Ask the service to block until a cold model is loaded.
    pub fn wait_for_model(mut self, wait: bool) -> Self {
        self.wait_for_model = wait;
        self
    }

    /// Build the backend.
    pub fn build(self) -> Result<HfInferenceBackend> {
        if self.model.trim().is_empty() {
            return Err(InferenceError::Config("model id must not be empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| InferenceError::Config(e.to_string()))?;

        let url = format!("{}/{}", self.endpoint.trim_end_matches('/'), self.model);
        debug!("Summarization backend: {}", url);

        Ok(HfInferenceBackend {
            client,
            url,
            model: self.model,
            api_token: self.api_token,
            wait_for_model: self.wait_for_model,
        })
    }
}

impl HfInferenceBackend {
    /// Start building a backend with default settings.
    pub fn builder() -> HfInferenceBackendBuilder {
        HfInferenceBackendBuilder {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_token: None,
            timeout: Duration::from_secs(120),
            wait_for_model: true,
        }
    }

    /// Full URL requests are posted to.
    pub fn url(&self) -> &str {
        &self.url
    }

    fn parse_summary(body: &str) -> Result<String> {
        let items: Vec<SummaryItem> = serde_json::from_str(body).map_err(|e| {
            // Some deployments answer 200 with an error object.
            match serde_json::from_str::<ApiError>(body) {
                Ok(api) => InferenceError::Api {
                    status: 200,
                    message: api.error,
                },
                Err(_) => InferenceError::InvalidResponse(e.to_string()),
            }
        })?;

        let summary = items
            .into_iter()
            .next()
            .map(|item| item.summary_text)
            .ok_or(InferenceError::EmptySummary)?;

        if summary.trim().is_empty() {
            return Err(InferenceError::EmptySummary);
        }
        Ok(summary)
    }

    fn error_message(body: &str) -> String {
        serde_json::from_str::<ApiError>(body)
            .map(|api| api.error)
            .unwrap_or_else(|_| body.trim().to_string())
    }
}

impl SummarizationBackend for HfInferenceBackend {
    async fn summarize(&self, text: &str, params: &GenerationParams) -> Result<String> {
        debug!(
            "Requesting summary of {} chars (max_length={}, min_length={}, do_sample={})",
            text.chars().count(),
            params.max_length,
            params.min_length,
            params.do_sample
        );

        let payload = SummarizationRequest {
            inputs: text,
            parameters: params,
            options: RequestOptions {
                wait_for_model: self.wait_for_model,
            },
        };

        let mut request = self.client.post(&self.url).json(&payload);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| InferenceError::Request(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| InferenceError::Request(e.to_string()))?;
        trace!("Inference response {}: {}", status, body);

        if !status.is_success() {
            return Err(InferenceError::Api {
                status: status.as_u16(),
                message: Self::error_message(&body),
            });
        }

        Self::parse_summary(&body)
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}
