//! Typed error for the query flow.
//!
//! Every failure of the two external calls is folded into one of these
//! variants. The display text is what HTTP callers see.

use ai_llm_service::AiLlmError;
use rag_store::RagError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueryError {
    /// The vector store failed (including query embedding).
    #[error("Database error: {0}")]
    Retrieval(#[source] RagError),

    /// The language model failed to produce a completion.
    #[error("Model error: {0}")]
    Generation(#[source] AiLlmError),
}
