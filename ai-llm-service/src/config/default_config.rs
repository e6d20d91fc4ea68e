//! Default LLM configs loaded from environment variables.
//!
//! Two roles are used by the backend:
//!
//! - **Chat**      → answers the grounded question (`/api/generate`)
//! - **Embedding** → embeds the query for similarity search
//!
//! # Environment variables
//!
//! - `OLLAMA_URL` or `OLLAMA_PORT` = endpoint (default `http://localhost:11434`)
//! - `OLLAMA_MODEL`                = chat model (default `mistral`)
//! - `EMBEDDING_MODEL`             = embedding model (default `nomic-embed-text`)
//! - `LLM_MAX_TOKENS`              = optional max tokens (u32)

use crate::{
    config::llm_model_config::LlmModelConfig,
    error_handler::{AiLlmError, ConfigError, env_opt_u32, env_or},
};

/// Chat model used when `OLLAMA_MODEL` is not set.
pub const DEFAULT_CHAT_MODEL: &str = "mistral";

/// Embedding model used when `EMBEDDING_MODEL` is not set.
pub const DEFAULT_EMBEDDING_MODEL: &str = "nomic-embed-text";

/// Ollama endpoint used when neither `OLLAMA_URL` nor `OLLAMA_PORT` is set.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Resolves the Ollama endpoint from environment.
///
/// Precedence:
/// 1. `OLLAMA_URL` if present and non-empty
/// 2. `OLLAMA_PORT` → `http://localhost:{port}`
/// 3. [`DEFAULT_OLLAMA_URL`]
///
/// # Errors
///
/// - [`ConfigError::InvalidNumber`] if `OLLAMA_PORT` is invalid
pub fn ollama_endpoint() -> Result<String, AiLlmError> {
    resolve_endpoint(
        std::env::var("OLLAMA_URL").ok(),
        std::env::var("OLLAMA_PORT").ok(),
    )
}

fn resolve_endpoint(url: Option<String>, port: Option<String>) -> Result<String, AiLlmError> {
    if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
        return Ok(url.trim().to_string());
    }
    if let Some(port) = port.filter(|p| !p.trim().is_empty()) {
        let port = port
            .trim()
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidNumber {
                var: "OLLAMA_PORT",
                reason: "expected u16 (1..=65535)",
            })?;
        return Ok(format!("http://localhost:{port}"));
    }
    Ok(DEFAULT_OLLAMA_URL.to_string())
}

/// Constructs the config for the **chat** model that writes the answer.
///
/// # Defaults
/// - `temperature = None` (server default, as the model ships)
/// - `timeout_secs = Some(600)`
pub fn config_ollama_chat() -> Result<LlmModelConfig, AiLlmError> {
    let cfg = LlmModelConfig {
        model: env_or("OLLAMA_MODEL", DEFAULT_CHAT_MODEL),
        endpoint: ollama_endpoint()?,
        max_tokens: env_opt_u32("LLM_MAX_TOKENS")?,
        temperature: None,
        top_p: None,
        timeout_secs: Some(600),
    };
    cfg.validate()?;
    Ok(cfg)
}

/// Constructs the config for the **embedding** model.
///
/// # Defaults
/// - `temperature = Some(0.0)` (deterministic)
/// - `timeout_secs = Some(30)`
pub fn config_ollama_embedding() -> Result<LlmModelConfig, AiLlmError> {
    let cfg = LlmModelConfig {
        model: env_or("EMBEDDING_MODEL", DEFAULT_EMBEDDING_MODEL),
        endpoint: ollama_endpoint()?,
        max_tokens: None,
        temperature: Some(0.0),
        top_p: None,
        timeout_secs: Some(30),
    };
    cfg.validate()?;
    Ok(cfg)
}
