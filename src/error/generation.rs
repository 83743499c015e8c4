// Generation provider error types

use thiserror::Error;

/// Errors that can occur when interacting with a music generation provider.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("provider API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("invalid provider response: {0}")]
    InvalidResponse(String),

    #[error("request timeout")]
    Timeout,

    #[error("invalid generation request: {0}")]
    InvalidRequest(String),

    #[error("hosted provider selected but no API key configured")]
    MissingApiKey,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_message() {
        let err = GenerationError::Api {
            status: 503,
            message: "overloaded".to_string(),
        };
        assert!(err.to_string().contains("503"));
        assert!(err.to_string().contains("overloaded"));
    }
}
