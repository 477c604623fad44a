//! Vision client error types

use thiserror::Error;

/// Errors that can occur while talking to the vision worker
///
/// The pipeline renders each variant into a distinct stored diagnostic, so
/// the three cases must stay distinguishable: a reachable worker that
/// refused (`ApiError`), a reachable worker that answered garbage
/// (`InvalidJson`), and a worker that could not be reached (`Network`).
#[derive(Debug, Error)]
pub enum VisionError {
    #[error("HTTP {status}: {body}")]
    ApiError { status: u16, body: String },

    #[error("Invalid JSON from worker: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = VisionError::ApiError {
            status: 502,
            body: "bad gateway".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 502: bad gateway");
    }

    #[test]
    fn test_invalid_json_from() {
        let parse_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: VisionError = parse_err.into();
        assert!(matches!(err, VisionError::InvalidJson(_)));
    }
}
