//! Orchestration façade
//!
//! `BoatGpt` ties the registry, composer, data store, and the two external
//! clients together and exposes the operation set the host surface drives.
//! Clients return structured results; this is the boundary where failures
//! turn into in-band diagnostic strings, because the host surface has no
//! structured error channel.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::compose::compose;
use crate::config::Config;
use crate::datastore::{DataStore, labels_key};
use crate::llm::{ChatMessage, CompletionClient, GroqClient, LlmError};
use crate::registry::InstanceRegistry;
use crate::vision::{VisionClient, VisionError, WorkerVisionClient};

/// Render a transport-level completion failure as a diagnostic reply
fn completion_failure(err: &LlmError) -> String {
    format!("BoatGPT/Groq Error: {}", err)
}

/// Multi-instance chat engine
///
/// One `BoatGpt` is constructed per host session and injected wherever
/// operations are issued; there is no global registry.
pub struct BoatGpt {
    registry: InstanceRegistry,
    data: DataStore,
    completion: Arc<dyn CompletionClient>,
    vision: Arc<dyn VisionClient>,
}

impl BoatGpt {
    /// Create an engine over the given clients
    pub fn new(completion: Arc<dyn CompletionClient>, vision: Arc<dyn VisionClient>) -> Self {
        Self {
            registry: InstanceRegistry::new(),
            data: DataStore::new(),
            completion,
            vision,
        }
    }

    /// Create an engine with HTTP clients built from configuration
    pub fn from_config(config: &Config) -> eyre::Result<Self> {
        debug!("from_config: called");
        let completion = GroqClient::from_config(&config.llm).map_err(|e| eyre::eyre!("completion client: {}", e))?;
        let vision = WorkerVisionClient::from_config(&config.vision).map_err(|e| eyre::eyre!("vision client: {}", e))?;
        Ok(Self::new(Arc::new(completion), Arc::new(vision)))
    }

    // === Instance management ===

    /// Create an instance; no-op on blank ids
    pub async fn create_instance(&self, id: &str) {
        self.registry.create(id).await;
    }

    /// Current instance ids
    pub async fn list_instances(&self) -> Vec<String> {
        self.registry.list().await
    }

    /// Delete an instance; the default instance survives
    pub async fn delete_instance(&self, id: &str) {
        self.registry.delete(id.trim()).await;
    }

    /// Delete every instance; the default is immediately reinstated
    pub async fn delete_all_instances(&self) {
        self.registry.delete_all().await;
    }

    // === Role management ===

    /// Set an instance's persona verbatim, creating the instance if needed
    pub async fn set_role(&self, id: &str, role: &str) {
        let id = id.trim();
        if id.is_empty() {
            return;
        }
        self.registry.set_role(id, role).await;
    }

    /// An instance's persona, or empty string if it does not exist
    pub async fn get_role(&self, id: &str) -> String {
        self.registry.get_role(id.trim()).await
    }

    /// An instance's cached latest reply, or empty string
    pub async fn latest_response(&self, id: &str) -> String {
        self.registry.latest(id.trim()).await
    }

    /// Clear an instance's transcript and cached reply
    pub async fn clear_memory(&self, id: &str) {
        self.registry.clear_memory(id.trim()).await;
    }

    /// An instance's transcript, or empty if it does not exist
    pub async fn history(&self, id: &str) -> Vec<ChatMessage> {
        match self.registry.get(id.trim()).await {
            Some(instance) => instance.lock().await.history.clone(),
            None => Vec::new(),
        }
    }

    // === Ask protocol ===

    /// Memory-bearing ask: the reply is cached and the exchange becomes a
    /// permanent transcript turn
    pub async fn ask(&self, id: &str, text: &str) {
        let id = id.trim();
        if id.is_empty() || text.trim().is_empty() {
            debug!("ask: blank id or text, skipping");
            return;
        }
        self.run_ask(id, text, text, true, true).await;
    }

    /// Stateless ask: composes without history, never touches the
    /// transcript, returns the reply or diagnostic directly
    pub async fn quick_ask(&self, id: &str, text: &str) -> String {
        let id = id.trim();
        if id.is_empty() || text.trim().is_empty() {
            debug!("quick_ask: blank id or text, skipping");
            return String::new();
        }
        self.run_ask(id, text, text, false, false).await
    }

    /// Ask an instance about a stored data entry
    ///
    /// The stored value (empty if the key is absent) is wrapped in a fixed
    /// prompt template; the recorded user turn carries a `[DATA:<key>]`
    /// marker so data-driven turns stay distinguishable in the transcript.
    pub async fn ask_about_data(&self, id: &str, key: &str) -> String {
        let id = id.trim();
        let key = key.trim();
        if id.is_empty() || key.is_empty() {
            debug!("ask_about_data: blank id or key, skipping");
            return String::new();
        }

        let value = self.data.get(key).await;
        let prompt = format!("Analyze this data labeled \"{}\":\n{}", key, value);
        let recorded = format!("[DATA:{}] {}", key, prompt);
        self.run_ask(id, &prompt, &recorded, true, true).await
    }

    /// Shared ask pipeline
    ///
    /// `sent_text` goes on the wire; `recorded_text` is what the transcript
    /// keeps for the user turn (they differ only for data-driven asks).
    ///
    /// The instance lock is held across the network await: concurrent asks
    /// on one id serialize and cannot interleave their pair-appends, while
    /// other instances proceed unblocked.
    ///
    /// Failure asymmetry, preserved as observed in the reference behavior:
    /// any client-returned text - including the client's own
    /// placeholder-on-malformed-payload reply - is appended to history, but
    /// a transport-level error only updates `latest` and leaves the
    /// transcript untouched.
    async fn run_ask(&self, id: &str, sent_text: &str, recorded_text: &str, include_history: bool, record: bool) -> String {
        debug!(%id, %include_history, %record, "run_ask: called");
        let instance = self.registry.get_or_create(id).await;
        let mut state = instance.lock().await;

        let messages = compose(&state.role, &state.history, sent_text, include_history);

        match self.completion.complete(&messages).await {
            Ok(reply) => {
                debug!(%id, reply_len = %reply.len(), "run_ask: client returned text");
                state.latest = reply.clone();
                if record {
                    state.history.push(ChatMessage::user(recorded_text));
                    state.history.push(ChatMessage::assistant(reply.clone()));
                }
                reply
            }
            Err(e) => {
                warn!(%id, error = %e, "run_ask: completion call failed");
                let diagnostic = completion_failure(&e);
                state.latest = diagnostic.clone();
                diagnostic
            }
        }
    }

    // === Data / vision pipeline ===

    /// Analyze an image and store the outcome under `key`
    ///
    /// Every path - caption, worker-reported error, empty payload, HTTP
    /// failure, garbled body, network failure - leaves `key` holding some
    /// string, so `get_data(key)` is always defined afterwards.
    pub async fn analyze_image(&self, image: &str, key: &str) {
        let key = key.trim();
        if image.is_empty() || key.is_empty() {
            debug!("analyze_image: blank image or key, skipping");
            return;
        }

        let stored = match self.vision.describe(image).await {
            Ok(payload) => {
                if let Some(caption) = payload.caption() {
                    if let Some(labels) = payload.label_values() {
                        self.data.put(&labels_key(key), labels.to_string()).await;
                    }
                    caption.to_string()
                } else if let Some(error) = payload.worker_error() {
                    debug!(%key, "analyze_image: worker reported an error");
                    format!("Vision error: {}", error)
                } else {
                    debug!(%key, "analyze_image: payload had neither result nor error");
                    "Vision returned no result".to_string()
                }
            }
            Err(VisionError::ApiError { status, body }) => {
                warn!(%key, %status, "analyze_image: worker returned non-success status");
                if body.is_empty() {
                    format!("Vision error: HTTP {}", status)
                } else {
                    format!("Vision error: HTTP {}: {}", status, body)
                }
            }
            Err(VisionError::InvalidJson(e)) => {
                warn!(%key, error = %e, "analyze_image: unparseable worker response");
                "Vision error: Invalid JSON from worker".to_string()
            }
            Err(e @ VisionError::Network(_)) => {
                warn!(%key, error = %e, "analyze_image: call failed");
                format!("BoatGPT analyze error: {}", e)
            }
        };

        self.data.put(key, stored).await;
    }

    /// A stored data entry, or empty string if absent
    pub async fn get_data(&self, key: &str) -> String {
        self.data.get(key.trim()).await
    }

    /// Remove a data entry; its `_labels` companion is left untouched
    pub async fn clear_data(&self, key: &str) {
        self.data.clear(key.trim()).await;
    }
}
