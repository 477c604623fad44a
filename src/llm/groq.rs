//! Groq worker client
//!
//! Implements the CompletionClient trait against an OpenAI-compatible
//! chat-completions endpoint (the BoatGPT Groq-proxying worker by default).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{ChatMessage, CompletionClient, LlmError};
use crate::config::LlmConfig;

/// Reply substituted when the response parses but carries no reply text
///
/// This is deliberately an `Ok` path: callers treat it like any other reply,
/// so it ends up in `latest` and in the transcript.
pub const INVALID_RESPONSE_REPLY: &str = "BoatGPT/Groq Error: Invalid response format";

/// Client for an OpenAI-compatible chat-completions endpoint
pub struct GroqClient {
    model: String,
    base_url: String,
    api_key: Option<String>,
    http: Client,
}

impl GroqClient {
    /// Create a new client from configuration
    ///
    /// The bearer token is read from the environment variable named in
    /// `api-key-env`, when one is configured. The default worker endpoint
    /// needs no key.
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        debug!(model = %config.model, base_url = %config.base_url, "from_config: called");
        let api_key = match &config.api_key_env {
            Some(var) => match std::env::var(var) {
                Ok(key) => Some(key),
                Err(_) => {
                    warn!(%var, "from_config: api-key-env set but variable is unset, sending no auth");
                    None
                }
            },
            None => None,
        };

        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(LlmError::Network)?;

        Ok(Self {
            model: config.model.clone(),
            base_url: config.base_url.clone(),
            api_key,
            http,
        })
    }

    /// Build the request body for the chat-completions endpoint
    fn build_request_body(&self, messages: &[ChatMessage]) -> serde_json::Value {
        debug!(%self.model, message_count = %messages.len(), "build_request_body: called");
        serde_json::json!({
            "model": self.model,
            "messages": messages,
        })
    }

    /// Pull the reply text out of a parsed response
    ///
    /// Missing choices, message, or content all collapse to the placeholder
    /// reply rather than an error; see the trait contract.
    fn extract_reply(api_response: GroqResponse) -> String {
        let reply = api_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content);

        match reply {
            Some(text) => text,
            None => {
                warn!("extract_reply: response carried no reply text, substituting placeholder");
                INVALID_RESPONSE_REPLY.to_string()
            }
        }
    }
}

#[async_trait]
impl CompletionClient for GroqClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        debug!(%self.model, message_count = %messages.len(), "complete: called");
        let url = format!("{}/v1/chat/completions", self.base_url);
        let body = self.build_request_body(messages);

        let mut request = self
            .http
            .post(&url)
            .header("content-type", "application/json")
            .json(&body);

        if let Some(key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {}", key));
        }

        let response = request.send().await.map_err(LlmError::Network)?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            debug!(%status, "complete: API error");
            let text = response.text().await.unwrap_or_default();
            return Err(LlmError::ApiError { status, message: text });
        }

        // An unparseable body is a transport-level failure; a parsed body
        // with missing fields is a placeholder reply.
        let api_response: GroqResponse = response.json().await.map_err(LlmError::Network)?;
        debug!("complete: success");
        Ok(Self::extract_reply(api_response))
    }
}

// Response types; every field optional so missing pieces degrade to the
// placeholder instead of a decode failure.

#[derive(Debug, Deserialize)]
struct GroqResponse {
    #[serde(default)]
    choices: Vec<GroqChoice>,
}

#[derive(Debug, Deserialize)]
struct GroqChoice {
    message: Option<GroqMessage>,
}

#[derive(Debug, Deserialize)]
struct GroqMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> GroqClient {
        GroqClient {
            model: "llama-3.1-8b-instant".to_string(),
            base_url: "https://example.invalid".to_string(),
            api_key: None,
            http: Client::new(),
        }
    }

    #[test]
    fn test_build_request_body() {
        let client = test_client();
        let messages = vec![
            ChatMessage::system("You are a dockhand."),
            ChatMessage::user("Where's the harbor master?"),
        ];

        let body = client.build_request_body(&messages);

        assert_eq!(body["model"], "llama-3.1-8b-instant");
        assert!(body["messages"].is_array());
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "You are a dockhand.");
        assert_eq!(body["messages"][1]["role"], "user");
    }

    #[test]
    fn test_extract_reply_happy_path() {
        let api_response: GroqResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":"Down the pier."}}]}"#).unwrap();
        assert_eq!(GroqClient::extract_reply(api_response), "Down the pier.");
    }

    #[test]
    fn test_extract_reply_no_choices() {
        let api_response: GroqResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(GroqClient::extract_reply(api_response), INVALID_RESPONSE_REPLY);
    }

    #[test]
    fn test_extract_reply_missing_content() {
        let api_response: GroqResponse = serde_json::from_str(r#"{"choices":[{"message":{}}]}"#).unwrap();
        assert_eq!(GroqClient::extract_reply(api_response), INVALID_RESPONSE_REPLY);

        let api_response: GroqResponse = serde_json::from_str(r#"{"choices":[{}]}"#).unwrap();
        assert_eq!(GroqClient::extract_reply(api_response), INVALID_RESPONSE_REPLY);
    }
}
