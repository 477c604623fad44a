//! Instance registry
//!
//! Owns the id -> conversation mapping. Instances are created lazily on
//! first reference and live until explicitly deleted; the default instance
//! is created at construction and can never be removed.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use crate::llm::ChatMessage;

/// Id of the reserved default instance
pub const DEFAULT_INSTANCE: &str = "boatgpt";

/// Persona assigned to newly created instances
pub const DEFAULT_ROLE: &str = "You are BoatGPT, an AI character.";

/// Per-instance conversation state
///
/// `history` is append-only and grows exclusively by matched user/assistant
/// pairs written by the memory-bearing ask path. `latest` caches the most
/// recent reply or diagnostic and is never unset once written.
#[derive(Debug, Clone)]
pub struct ConversationState {
    pub role: String,
    pub history: Vec<ChatMessage>,
    pub latest: String,
}

impl Default for ConversationState {
    fn default() -> Self {
        Self {
            role: DEFAULT_ROLE.to_string(),
            history: Vec::new(),
            latest: String::new(),
        }
    }
}

/// Registry of named conversation instances
///
/// The outer lock guards only the map itself and is never held across an
/// await. Each instance sits behind its own mutex, which ask-path callers
/// hold across the network call so per-instance mutations serialize without
/// blocking other instances.
pub struct InstanceRegistry {
    instances: Mutex<HashMap<String, Arc<Mutex<ConversationState>>>>,
}

impl InstanceRegistry {
    /// Create a registry containing only the default instance
    pub fn new() -> Self {
        let mut instances = HashMap::new();
        instances.insert(
            DEFAULT_INSTANCE.to_string(),
            Arc::new(Mutex::new(ConversationState::default())),
        );
        Self {
            instances: Mutex::new(instances),
        }
    }

    /// Return the instance for `id`, creating it if absent
    ///
    /// Idempotent: a second call with the same id returns the same instance.
    pub async fn get_or_create(&self, id: &str) -> Arc<Mutex<ConversationState>> {
        let mut instances = self.instances.lock().await;
        instances
            .entry(id.to_string())
            .or_insert_with(|| {
                debug!(%id, "get_or_create: creating instance");
                Arc::new(Mutex::new(ConversationState::default()))
            })
            .clone()
    }

    /// Return the instance for `id` if it exists
    pub async fn get(&self, id: &str) -> Option<Arc<Mutex<ConversationState>>> {
        self.instances.lock().await.get(id).cloned()
    }

    /// Create an instance; no-op on empty or whitespace-only ids
    pub async fn create(&self, id: &str) {
        let id = id.trim();
        if id.is_empty() {
            debug!("create: empty id, skipping");
            return;
        }
        self.get_or_create(id).await;
    }

    /// Delete an instance; the default instance is protected
    pub async fn delete(&self, id: &str) {
        if id == DEFAULT_INSTANCE {
            debug!("delete: refusing to delete default instance");
            return;
        }
        self.instances.lock().await.remove(id);
    }

    /// Delete every instance, then reinstate the default
    pub async fn delete_all(&self) {
        debug!("delete_all: called");
        let mut instances = self.instances.lock().await;
        instances.clear();
        instances.insert(
            DEFAULT_INSTANCE.to_string(),
            Arc::new(Mutex::new(ConversationState::default())),
        );
    }

    /// Current instance ids; order is unspecified
    pub async fn list(&self) -> Vec<String> {
        self.instances.lock().await.keys().cloned().collect()
    }

    /// Overwrite an instance's role verbatim, creating the instance if needed
    ///
    /// An empty role is permitted and will be sent as an empty system
    /// message rather than falling back to the default persona.
    pub async fn set_role(&self, id: &str, role: &str) {
        debug!(%id, role_len = %role.len(), "set_role: called");
        let instance = self.get_or_create(id).await;
        instance.lock().await.role = role.to_string();
    }

    /// An instance's role, or empty string if it does not exist
    pub async fn get_role(&self, id: &str) -> String {
        match self.get(id).await {
            Some(instance) => instance.lock().await.role.clone(),
            None => String::new(),
        }
    }

    /// An instance's cached latest reply, or empty string if absent
    pub async fn latest(&self, id: &str) -> String {
        match self.get(id).await {
            Some(instance) => instance.lock().await.latest.clone(),
            None => String::new(),
        }
    }

    /// Clear an existing instance's transcript and cached reply
    ///
    /// No-op when the instance does not exist; does not create it.
    pub async fn clear_memory(&self, id: &str) {
        debug!(%id, "clear_memory: called");
        if let Some(instance) = self.get(id).await {
            let mut state = instance.lock().await;
            state.history.clear();
            state.latest = String::new();
        }
    }
}

impl Default for InstanceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
