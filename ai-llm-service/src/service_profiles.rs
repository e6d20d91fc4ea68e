//! Shared LLM service with two profiles: `chat` and `embedding`.
//!
//! - Lives in the same Tokio runtime as the application.
//! - Construct once, wrap in `Arc`, and pass clones to dependents.
//! - Both Ollama clients are built eagerly so config errors surface at startup.
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use ai_llm_service::LlmServiceProfiles;
//! use ai_llm_service::config::default_config::{config_ollama_chat, config_ollama_embedding};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let svc = Arc::new(LlmServiceProfiles::new(
//!     config_ollama_chat()?,
//!     config_ollama_embedding()?,
//! )?);
//!
//! let txt = svc.generate("When should maize be top-dressed?").await?;
//! let emb = svc.embed("maize top-dressing").await?;
//! println!("{txt} / dim = {}", emb.len());
//! # Ok(()) }
//! ```

use std::sync::Arc;

use tracing::info;

use crate::{
    config::{
        default_config::{config_ollama_chat, config_ollama_embedding},
        llm_model_config::LlmModelConfig,
    },
    error_handler::AiLlmError,
    services::ollama_service::OllamaService,
};

/// Shared service that manages the **chat** and **embedding** profiles.
///
/// When both profiles point at the same endpoint/model/timeout, a single
/// client is shared between them.
#[derive(Debug)]
pub struct LlmServiceProfiles {
    chat: Arc<OllamaService>,
    embedding: Arc<OllamaService>,
    chat_cfg: LlmModelConfig,
    embedding_cfg: LlmModelConfig,
}

impl LlmServiceProfiles {
    /// Creates a new service from explicit profiles.
    ///
    /// # Errors
    /// Returns [`AiLlmError`] if either profile fails validation or its HTTP
    /// client cannot be built.
    pub fn new(chat: LlmModelConfig, embedding: LlmModelConfig) -> Result<Self, AiLlmError> {
        chat.validate()?;
        embedding.validate()?;

        let chat_cli = Arc::new(OllamaService::new(chat.clone())?);
        let embedding_cli = if embedding == chat {
            chat_cli.clone()
        } else {
            Arc::new(OllamaService::new(embedding.clone())?)
        };

        info!(
            chat_model = %chat.model,
            embedding_model = %embedding.model,
            endpoint = %chat.endpoint,
            "LLM profiles ready"
        );

        Ok(Self {
            chat: chat_cli,
            embedding: embedding_cli,
            chat_cfg: chat,
            embedding_cfg: embedding,
        })
    }

    /// Builds both profiles from environment variables.
    ///
    /// See [`crate::config::default_config`] for the variables and defaults.
    pub fn from_env() -> Result<Self, AiLlmError> {
        Self::new(config_ollama_chat()?, config_ollama_embedding()?)
    }

    /// Generates text using the **chat** profile.
    ///
    /// # Errors
    /// Returns [`AiLlmError::Ollama`] if generation fails.
    pub async fn generate(&self, prompt: &str) -> Result<String, AiLlmError> {
        self.chat.generate(prompt).await.map_err(AiLlmError::from)
    }

    /// Computes embeddings using the **embedding** profile.
    ///
    /// # Errors
    /// Returns [`AiLlmError::Ollama`] if embedding fails.
    pub async fn embed(&self, input: &str) -> Result<Vec<f32>, AiLlmError> {
        self.embedding
            .embeddings(input)
            .await
            .map_err(AiLlmError::from)
    }

    /// Returns references to the current profiles `(chat, embedding)`.
    pub fn profiles(&self) -> (&LlmModelConfig, &LlmModelConfig) {
        (&self.chat_cfg, &self.embedding_cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(model: &str) -> LlmModelConfig {
        LlmModelConfig {
            model: model.into(),
            endpoint: "http://localhost:11434".into(),
            max_tokens: None,
            temperature: None,
            top_p: None,
            timeout_secs: Some(30),
        }
    }

    #[test]
    fn identical_profiles_share_one_client() {
        let svc = LlmServiceProfiles::new(profile("mistral"), profile("mistral")).unwrap();
        assert!(Arc::ptr_eq(&svc.chat, &svc.embedding));
    }

    #[test]
    fn distinct_profiles_get_own_clients() {
        let svc =
            LlmServiceProfiles::new(profile("mistral"), profile("nomic-embed-text")).unwrap();
        assert!(!Arc::ptr_eq(&svc.chat, &svc.embedding));
        let (chat, emb) = svc.profiles();
        assert_eq!(chat.model, "mistral");
        assert_eq!(emb.model, "nomic-embed-text");
    }

    #[test]
    fn invalid_profile_fails_at_construction() {
        let err = LlmServiceProfiles::new(profile(""), profile("nomic-embed-text")).unwrap_err();
        assert!(matches!(err, AiLlmError::Config(_)));
    }
}
