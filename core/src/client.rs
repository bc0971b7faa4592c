use reqwest::Client;
use tracing::{debug, error};

use crate::config::GeminiConfig;
use crate::errors::{GeminiError, GeminiResult};
use crate::prompt::build_grading_prompt;
use crate::types::{GenerateContentRequest, GenerateContentResponse};

/// Substituted when the success response lacks the expected candidate path.
pub const FALLBACK_RESPONSE: &str = "A IA não respondeu.";

/// Client for the Gemini generateContent endpoint.
///
/// One-shot by design: a single synchronous attempt per call, no retry, no
/// backoff, no timeout configuration, no streaming.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Create a new Gemini API client
    pub fn new(config: GeminiConfig) -> GeminiResult<Self> {
        if config.api_key.as_deref().unwrap_or("").is_empty() {
            return Err(GeminiError::ConfigError(
                "API key is required to initialize the Gemini client".to_string(),
            ));
        }

        Ok(Self {
            client: Client::new(),
            config,
        })
    }

    /// Endpoint URL with the key embedded as a query parameter.
    fn request_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.config.api_base(),
            self.config.model_name(),
            self.config.api_key.as_deref().unwrap_or("")
        )
    }

    /// Issues one POST to the API and parses the response.
    ///
    /// The body is always read and parsed as JSON before the status check,
    /// so a non-success status carries the upstream body verbatim in the
    /// returned error. A success body that parses as JSON but lacks the
    /// expected nesting deserializes to an empty response, never an error.
    pub async fn generate_content(
        &self,
        request: GenerateContentRequest,
    ) -> GeminiResult<GenerateContentResponse> {
        let url = self.request_url();

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| GeminiError::RequestError(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GeminiError::ResponseError(format!("Failed to read response: {}", e)))?;

        let json: serde_json::Value = serde_json::from_str(&body)
            .map_err(|e| GeminiError::ResponseError(format!("Failed to parse response: {}", e)))?;

        if !status.is_success() {
            error!(status = status.as_u16(), "Gemini API returned an error");
            return Err(GeminiError::UpstreamError {
                status: status.as_u16(),
                body: json,
            });
        }

        debug!("Gemini API call succeeded");
        Ok(serde_json::from_value(json).unwrap_or_default())
    }

    /// Builds the correction prompt for `(topic, essay)`, performs the call
    /// and returns the trimmed answer text, falling back to
    /// [`FALLBACK_RESPONSE`] when the candidate path is absent or blank.
    pub async fn grade_essay(&self, topic: &str, essay: &str) -> GeminiResult<String> {
        let prompt = build_grading_prompt(topic, essay);
        let request = GenerateContentRequest::from_text(prompt);
        let response = self.generate_content(request).await?;

        let text = response
            .first_text()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(FALLBACK_RESPONSE);
        Ok(text.trim().to_string())
    }
}
