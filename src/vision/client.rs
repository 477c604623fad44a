//! VisionClient trait definition

use async_trait::async_trait;
use serde::Deserialize;
#[allow(unused_imports)]
use tracing::debug;

use super::VisionError;

/// Decoded response from the vision worker
///
/// Every field is optional by design: the worker may answer with a caption,
/// an in-band error, or nothing at all, and the pipeline enumerates each
/// branch explicitly rather than chaining lookups.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VisionPayload {
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub labels: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<String>,
}

impl VisionPayload {
    /// The caption, treating an empty string the same as an absent field
    pub fn caption(&self) -> Option<&str> {
        self.result.as_deref().filter(|s| !s.is_empty())
    }

    /// The in-band error, treating an empty string the same as absent
    pub fn worker_error(&self) -> Option<&str> {
        self.error.as_deref().filter(|s| !s.is_empty())
    }

    /// Labels, treating JSON `null` the same as an absent field
    pub fn label_values(&self) -> Option<&serde_json::Value> {
        self.labels.as_ref().filter(|v| !v.is_null())
    }
}

/// Client for a service that turns an image into a textual description
///
/// The image argument is an opaque string (a data URI in practice); this
/// layer does no pre-processing.
#[async_trait]
pub trait VisionClient: Send + Sync {
    /// Describe one image
    async fn describe(&self, image: &str) -> Result<VisionPayload, VisionError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Mock vision client for unit tests
    pub struct MockVisionClient {
        outcomes: Mutex<VecDeque<Result<VisionPayload, VisionError>>>,
    }

    impl MockVisionClient {
        pub fn new(outcomes: Vec<Result<VisionPayload, VisionError>>) -> Self {
            debug!(outcome_count = %outcomes.len(), "MockVisionClient::new: called");
            Self {
                outcomes: Mutex::new(outcomes.into()),
            }
        }

        /// A client that answers with a plain caption
        pub fn captioning(caption: &str) -> Self {
            Self::new(vec![Ok(VisionPayload {
                result: Some(caption.to_string()),
                ..Default::default()
            })])
        }
    }

    #[async_trait]
    impl VisionClient for MockVisionClient {
        async fn describe(&self, image: &str) -> Result<VisionPayload, VisionError> {
            debug!(image_len = %image.len(), "MockVisionClient::describe: called");
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(VisionPayload::default()))
        }
    }
}
