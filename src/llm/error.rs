//! Completion client error types

use thiserror::Error;

/// Errors that can occur while talking to the completion endpoint
///
/// Every variant here is a transport-level failure: the caller never got a
/// reply out of the service. A response that parsed but lacked the expected
/// reply field is *not* an error; the client substitutes a placeholder reply
/// for that case instead.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LlmError {
    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            LlmError::ApiError { status, .. } => *status >= 500,
            LlmError::Network(_) => true,
            LlmError::Json(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_retryable() {
        // 5xx errors should be retryable
        assert!(
            LlmError::ApiError {
                status: 502,
                message: "Bad gateway".to_string()
            }
            .is_retryable()
        );

        // 4xx errors should not be retryable
        assert!(
            !LlmError::ApiError {
                status: 400,
                message: "Bad request".to_string()
            }
            .is_retryable()
        );
    }

    #[test]
    fn test_display_includes_status() {
        let err = LlmError::ApiError {
            status: 503,
            message: "unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "API error 503: unavailable");
    }
}
