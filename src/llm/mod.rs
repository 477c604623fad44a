//! Completion client module
//!
//! Provides the chat wire types, the CompletionClient seam, and the Groq
//! worker implementation.

pub mod client;
mod error;
mod groq;
mod types;

pub use client::CompletionClient;
pub use error::LlmError;
pub use groq::{GroqClient, INVALID_RESPONSE_REPLY};
pub use types::{ChatMessage, Role};
