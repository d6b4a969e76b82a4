//! Advice backend error types.
//!
//! These never reach the caller of `AdviceClient`; they are classified here so
//! the failure can be logged with a stable label before it is replaced by a
//! fallback message.

use thiserror::Error;

/// Errors that can occur when talking to a text-generation backend.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The API returned a 429 rate limit response.
    #[error("rate limited, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    /// The API key was rejected.
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The configured model does not exist.
    #[error("model not found: {0}")]
    ModelNotFound(String),

    /// The API returned an error response or an undecodable body.
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The transport timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    NetworkError(String),
}

impl ProviderError {
    /// Short stable label for log fields.
    pub fn label(&self) -> &'static str {
        match self {
            ProviderError::RateLimited { .. } => "rate_limited",
            ProviderError::AuthenticationFailed(_) => "auth",
            ProviderError::ModelNotFound(_) => "model_not_found",
            ProviderError::ApiError { .. } => "api",
            ProviderError::Timeout(_) => "timeout",
            ProviderError::NetworkError(_) => "network",
        }
    }
}
