//! Error types for the scaling service client.

use thiserror::Error;

/// Errors surfaced by the scaling service collaborators.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("scaling service error: {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
        request_id: Option<String>,
    },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("invalid response body: {0}")]
    Decode(String),

    #[error("failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("invalid client configuration: {0}")]
    Config(String),
}

impl ProviderError {
    /// Create an API error from response details.
    pub fn api(
        status: u16,
        code: impl Into<String>,
        message: impl Into<String>,
        request_id: Option<String>,
    ) -> Self {
        Self::Api {
            status,
            code: code.into(),
            message: message.into(),
            request_id,
        }
    }
}
