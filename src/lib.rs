//! BoatGPT - multi-instance chat engine with a vision-fed data store
//!
//! A host process keeps any number of named conversational agents, each with
//! its own persona, transcript, and cached latest reply, in front of an
//! OpenAI-compatible completion worker. A second pipeline describes images
//! through a vision worker and stores the results in a keyed data store that
//! conversations can be asked about.
//!
//! # Modules
//!
//! - [`engine`] - the orchestration façade tying everything together
//! - [`registry`] - instance ownership and lifecycle
//! - [`compose`] - request message composition
//! - [`datastore`] - keyed textual artifacts
//! - [`llm`] - completion client seam and Groq worker implementation
//! - [`vision`] - vision client seam and worker implementation
//! - [`config`] - configuration types and loading
//! - [`cli`] / [`repl`] - the command-line host surface

pub mod cli;
pub mod compose;
pub mod config;
pub mod datastore;
pub mod engine;
pub mod llm;
pub mod registry;
pub mod repl;
pub mod vision;

// Re-export commonly used types
pub use compose::compose;
pub use config::{Config, LlmConfig, VisionConfig};
pub use datastore::{DataStore, labels_key};
pub use engine::BoatGpt;
pub use llm::{ChatMessage, CompletionClient, GroqClient, INVALID_RESPONSE_REPLY, LlmError, Role};
pub use registry::{ConversationState, DEFAULT_INSTANCE, DEFAULT_ROLE, InstanceRegistry};
pub use vision::{VisionClient, VisionError, VisionPayload, WorkerVisionClient};
