use std::time::Duration;

use thiserror::Error;

/// Failures talking to the completion service.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("completion service is not configured (set OPENAI_API_KEY)")]
    NotConfigured,

    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("completion service returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("completion service did not answer within {0:?}")]
    Timeout(Duration),

    #[error("completion reply is not valid JSON: {0}")]
    InvalidReply(String),

    #[error("failed to encode request payload: {0}")]
    Encode(serde_json::Error),
}
