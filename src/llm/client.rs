//! CompletionClient trait definition

use async_trait::async_trait;
#[allow(unused_imports)]
use tracing::debug;

use super::{ChatMessage, LlmError};

/// Stateless completion client - each call is independent
///
/// This is the seam between the ask protocol and the remote service. The
/// implementation owns the wire format; callers hand over a fully composed
/// message list and get back either reply text or a transport-level error.
///
/// Contract: a response that arrives and parses but is missing the expected
/// reply field must yield `Ok` with a deterministic placeholder string, not
/// an error. Only failures that prevented any reply from coming back (network
/// failure, non-success status, unparseable body) surface as `Err`.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send one composed message list, return the reply text
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Mock completion client for unit tests
    ///
    /// Plays back a scripted sequence of outcomes and records the message
    /// lists it was called with, so tests can assert on composition.
    pub struct MockCompletionClient {
        outcomes: Mutex<VecDeque<Result<String, LlmError>>>,
        requests: Mutex<Vec<Vec<ChatMessage>>>,
        call_count: AtomicUsize,
    }

    impl MockCompletionClient {
        pub fn new(outcomes: Vec<Result<String, LlmError>>) -> Self {
            debug!(outcome_count = %outcomes.len(), "MockCompletionClient::new: called");
            Self {
                outcomes: Mutex::new(outcomes.into()),
                requests: Mutex::new(Vec::new()),
                call_count: AtomicUsize::new(0),
            }
        }

        /// Convenience constructor for all-success scripts
        pub fn replies(replies: &[&str]) -> Self {
            Self::new(replies.iter().map(|r| Ok(r.to_string())).collect())
        }

        /// A client that always fails at the transport level
        pub fn failing(status: u16, message: &str) -> Self {
            Self::new(vec![Err(LlmError::ApiError {
                status,
                message: message.to_string(),
            })])
        }

        pub fn call_count(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }

        /// Message lists received so far, in call order
        pub fn requests(&self) -> Vec<Vec<ChatMessage>> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CompletionClient for MockCompletionClient {
        async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
            debug!(message_count = %messages.len(), "MockCompletionClient::complete: called");
            self.call_count.fetch_add(1, Ordering::SeqCst);
            self.requests.lock().unwrap().push(messages.to_vec());
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok("out of scripted replies".to_string()))
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_mock_client_plays_back_outcomes() {
            let client = MockCompletionClient::replies(&["Response 1", "Response 2"]);

            let resp1 = client.complete(&[ChatMessage::user("a")]).await.unwrap();
            assert_eq!(resp1, "Response 1");

            let resp2 = client.complete(&[ChatMessage::user("b")]).await.unwrap();
            assert_eq!(resp2, "Response 2");

            assert_eq!(client.call_count(), 2);
        }

        #[tokio::test]
        async fn test_mock_client_records_requests() {
            let client = MockCompletionClient::replies(&["ok"]);

            let messages = vec![ChatMessage::system("persona"), ChatMessage::user("hi")];
            client.complete(&messages).await.unwrap();

            let requests = client.requests();
            assert_eq!(requests.len(), 1);
            assert_eq!(requests[0], messages);
        }

        #[tokio::test]
        async fn test_mock_client_failure_script() {
            let client = MockCompletionClient::failing(500, "boom");
            let result = client.complete(&[ChatMessage::user("hi")]).await;
            assert!(result.is_err());
        }
    }
}
