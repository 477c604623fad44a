//! Chat wire types
//!
//! These model the OpenAI chat-completions message format, which both the
//! composition pipeline and the Groq worker speak directly.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// A single turn in a conversation
///
/// Serializes directly into the `{role, content}` shape the completion
/// endpoint expects. History entries are stored in this form as well, so
/// composed requests need no conversion step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    /// Create a system message
    pub fn system(text: impl Into<String>) -> Self {
        debug!("ChatMessage::system: called");
        Self {
            role: Role::System,
            content: text.into(),
        }
    }

    /// Create a user message
    pub fn user(text: impl Into<String>) -> Self {
        debug!("ChatMessage::user: called");
        Self {
            role: Role::User,
            content: text.into(),
        }
    }

    /// Create an assistant message
    pub fn assistant(text: impl Into<String>) -> Self {
        debug!("ChatMessage::assistant: called");
        Self {
            role: Role::Assistant,
            content: text.into(),
        }
    }
}

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}
