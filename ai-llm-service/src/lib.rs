//! Shared LLM service for the AgriChatBot backend.
//!
//! Talks to a local Ollama server for two jobs:
//! - text generation for the answer (`chat` profile)
//! - query embeddings for similarity search (`embedding` profile)
//!
//! Construct [`service_profiles::LlmServiceProfiles`] once at startup, wrap it
//! in `Arc`, and hand clones to the components that need it.

pub mod config;
pub mod error_handler;
pub mod service_profiles;
pub mod services;

pub use config::llm_model_config::LlmModelConfig;
pub use error_handler::{AiLlmError, ConfigError};
pub use service_profiles::LlmServiceProfiles;
