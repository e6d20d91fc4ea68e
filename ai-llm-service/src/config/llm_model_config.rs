use crate::error_handler::{
    ConfigError, Result, validate_http_endpoint, validate_range_f32,
};

/// Configuration for one Ollama model profile.
///
/// # Fields
///
/// - `model`: The model identifier (e.g., `"mistral"`, `"nomic-embed-text"`).
/// - `endpoint`: Base URL of the Ollama server.
/// - `max_tokens`: Maximum number of tokens to generate (`num_predict`).
/// - `temperature`: Controls randomness (0.0 = deterministic, >1.0 = more random).
/// - `top_p`: Nucleus sampling cutoff (alternative to temperature).
/// - `timeout_secs`: Optional request timeout in seconds.
///
/// # Examples
///
/// ```
/// use ai_llm_service::LlmModelConfig;
///
/// let cfg = LlmModelConfig {
///     model: "mistral".to_string(),
///     endpoint: "http://localhost:11434".to_string(),
///     max_tokens: None,
///     temperature: None,
///     top_p: None,
///     timeout_secs: Some(600),
/// };
/// assert!(cfg.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LlmModelConfig {
    /// Model identifier string (e.g., `"mistral"`).
    pub model: String,

    /// Ollama base URL (e.g., `http://localhost:11434`).
    pub endpoint: String,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature (controls creativity).
    pub temperature: Option<f32>,

    /// Nucleus sampling parameter.
    pub top_p: Option<f32>,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,
}

impl LlmModelConfig {
    /// Checks the fields that would otherwise only fail on the first request.
    ///
    /// # Errors
    /// - [`ConfigError::EmptyModel`] if `model` is blank
    /// - [`ConfigError::InvalidFormat`] if `endpoint` is not http(s)
    /// - [`ConfigError::OutOfRange`] for `temperature` outside `0.0..=2.0`
    ///   or `top_p` outside `0.0..=1.0`
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel.into());
        }
        validate_http_endpoint("OLLAMA_URL", self.endpoint.trim())?;
        if let Some(t) = self.temperature {
            validate_range_f32("temperature", t, 0.0, 2.0)?;
        }
        if let Some(p) = self.top_p {
            validate_range_f32("top_p", p, 0.0, 1.0)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handler::AiLlmError;

    fn base() -> LlmModelConfig {
        LlmModelConfig {
            model: "mistral".into(),
            endpoint: "http://localhost:11434".into(),
            max_tokens: None,
            temperature: Some(0.2),
            top_p: None,
            timeout_secs: Some(600),
        }
    }

    #[test]
    fn accepts_default_shape() {
        assert!(base().validate().is_ok());
    }

    #[test]
    fn rejects_blank_model() {
        let cfg = LlmModelConfig {
            model: "  ".into(),
            ..base()
        };
        assert!(matches!(
            cfg.validate(),
            Err(AiLlmError::Config(ConfigError::EmptyModel))
        ));
    }

    #[test]
    fn rejects_non_http_endpoint() {
        let cfg = LlmModelConfig {
            endpoint: "localhost:11434".into(),
            ..base()
        };
        assert!(matches!(
            cfg.validate(),
            Err(AiLlmError::Config(ConfigError::InvalidFormat { .. }))
        ));
    }

    #[test]
    fn rejects_out_of_range_sampling() {
        let cfg = LlmModelConfig {
            top_p: Some(1.5),
            ..base()
        };
        assert!(matches!(
            cfg.validate(),
            Err(AiLlmError::Config(ConfigError::OutOfRange { field: "top_p", .. }))
        ));
    }
}
