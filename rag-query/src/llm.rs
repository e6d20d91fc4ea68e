//! Language-model seam used by the query flow.

use ai_llm_service::{AiLlmError, LlmServiceProfiles};
use rag_store::BoxFuture;

/// A text-completion backend: one prompt in, one completion out.
///
/// No streaming and no conversation state.
pub trait LanguageModel: Send + Sync {
    fn invoke<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String, AiLlmError>>;
}

impl LanguageModel for LlmServiceProfiles {
    fn invoke<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String, AiLlmError>> {
        Box::pin(self.generate(prompt))
    }
}
