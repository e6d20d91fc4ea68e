use crate::BoxFuture;
use crate::errors::RagError;

/// Provider interface for query embedding.
///
/// Async is required because real providers (Ollama etc.) perform HTTP
/// requests. Implement this trait to plug in another backend or a fake.
pub trait EmbeddingsProvider: Send + Sync {
    /// Async embedding function.
    fn embed<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<Vec<f32>, RagError>>;
}

pub mod ollama;
