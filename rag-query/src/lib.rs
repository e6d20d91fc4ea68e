//! RAG + LLM gateway for a single question.
//!
//! [`QueryHandler::answer`] runs the whole flow: similarity search in the
//! vector store (top 5), context assembly, prompt construction, one
//! completion from the language model, and source-id extraction.
//!
//! The store and the model are injected, so tests can swap in fakes.

mod api_types;
mod error;
mod llm;
pub mod prompt;

pub use api_types::QaAnswer;
pub use error::QueryError;
pub use llm::LanguageModel;

use std::sync::Arc;

use rag_store::VectorStore;
use tracing::{debug, info, instrument};

/// Number of documents retrieved per question.
pub const TOP_K: u64 = 5;

/// Answers questions from the injected store and model.
///
/// Holds no mutable state; share it across requests behind an `Arc`.
#[derive(Clone)]
pub struct QueryHandler {
    store: Arc<dyn VectorStore>,
    model: Arc<dyn LanguageModel>,
}

impl QueryHandler {
    pub fn new(store: Arc<dyn VectorStore>, model: Arc<dyn LanguageModel>) -> Self {
        Self { store, model }
    }

    /// Answers `query` grounded on the top [`TOP_K`] documents.
    ///
    /// Zero retrieved documents is not an error: the model is still asked,
    /// with an empty context block.
    ///
    /// # Errors
    /// - [`QueryError::Retrieval`] if the store (or query embedding) fails
    /// - [`QueryError::Generation`] if the model fails
    #[instrument(skip_all, fields(query_len = query.len()))]
    pub async fn answer(&self, query: &str) -> Result<QaAnswer, QueryError> {
        let docs = self
            .store
            .similarity_search_with_score(query, TOP_K)
            .await
            .map_err(QueryError::Retrieval)?;
        debug!("retrieved {} documents", docs.len());

        let context = prompt::build_context(&docs);
        let prompt = prompt::build_prompt(&context, query);

        let response = self
            .model
            .invoke(&prompt)
            .await
            .map_err(QueryError::Generation)?;

        let sources: Vec<Option<String>> = docs.iter().map(|d| d.source_id()).collect();
        info!(
            sources = sources.len(),
            response_len = response.len(),
            "query answered"
        );

        Ok(QaAnswer { response, sources })
    }
}
