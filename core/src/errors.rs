use thiserror::Error;

/// Gemini API errors
#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("Configuration Error: {0}")]
    ConfigError(String),

    #[error("Request Error: {0}")]
    RequestError(String),

    #[error("Response Error: {0}")]
    ResponseError(String),

    /// Non-success status from the API; the upstream body is kept verbatim
    /// so callers can forward it for diagnosis.
    #[error("Upstream Error: status {status}")]
    UpstreamError {
        status: u16,
        body: serde_json::Value,
    },
}

/// Result type for Gemini operations
pub type GeminiResult<T> = Result<T, GeminiError>;
