//! Provider error types.

use thiserror::Error;

/// Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Errors that can occur during provider operations.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// HTTP request failed.
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Invalid API response.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Missing API key.
    #[error("Missing API key for provider: {0}")]
    MissingApiKey(String),

    /// Invalid API key.
    #[error("Invalid API key for provider: {0}")]
    InvalidApiKey(String),

    /// Rate limited.
    #[error("Rate limit exceeded, please try again later")]
    RateLimited,

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// API error with status code.
    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },
}

impl ProviderError {
    /// Create a missing API key error.
    pub fn missing_api_key(provider: impl Into<String>) -> Self {
        Self::MissingApiKey(provider.into())
    }

    /// Create an invalid API key error.
    pub fn invalid_api_key(provider: impl Into<String>) -> Self {
        Self::InvalidApiKey(provider.into())
    }

    /// Create an invalid response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse(message.into())
    }

    /// Create an API error.
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ProviderError::RequestFailed(_) | ProviderError::RateLimited
        )
    }
}
