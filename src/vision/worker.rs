//! Vision worker client
//!
//! HTTP implementation of the VisionClient trait against the BoatGPT vision
//! worker.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::{VisionClient, VisionError, VisionPayload};
use crate::config::VisionConfig;

/// Client for the vision worker endpoint
pub struct WorkerVisionClient {
    base_url: String,
    http: Client,
}

impl WorkerVisionClient {
    /// Create a new client from configuration
    pub fn from_config(config: &VisionConfig) -> Result<Self, VisionError> {
        debug!(base_url = %config.base_url, "from_config: called");
        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(VisionError::Network)?;

        Ok(Self {
            base_url: config.base_url.clone(),
            http,
        })
    }
}

#[async_trait]
impl VisionClient for WorkerVisionClient {
    async fn describe(&self, image: &str) -> Result<VisionPayload, VisionError> {
        debug!(image_len = %image.len(), "describe: called");
        let body = serde_json::json!({ "image": image });

        let response = self
            .http
            .post(&self.base_url)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(VisionError::Network)?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            debug!(%status, "describe: worker returned non-success status");
            let body = response.text().await.unwrap_or_default();
            return Err(VisionError::ApiError { status, body });
        }

        // Decode via text so a garbled body is InvalidJson, not a reqwest
        // decode error; the pipeline stores a distinct diagnostic for it.
        let text = response.text().await.map_err(VisionError::Network)?;
        let payload: VisionPayload = serde_json::from_str(&text)?;
        debug!(
            has_result = %payload.result.is_some(),
            has_labels = %payload.labels.is_some(),
            has_error = %payload.error.is_some(),
            "describe: success"
        );
        Ok(payload)
    }
}
