//! Read-only RAG retrieval facade.
//!
//! This crate answers one question: "which stored chunks are closest to this
//! text?". It embeds the query with an [`EmbeddingsProvider`] and searches one
//! of two backends:
//! - a local JSONL index persisted on disk (default)
//! - a Qdrant collection
//!
//! Building or maintaining the index is out of scope; both backends only read.

mod config;
mod embed;
mod errors;
mod local_index;
mod qdrant_facade;
mod record;
mod retrieve;

pub use config::{DEFAULT_PERSIST_DIR, DOCUMENTS_FILE, RagConfig, VectorBackend};
pub use embed::EmbeddingsProvider;
pub use embed::ollama::{OllamaConfig, OllamaEmbedder};
pub use errors::RagError;
pub use record::RetrievedDocument;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use local_index::LocalIndex;
use qdrant_facade::QdrantFacade;

/// Boxed, sendable future used by the object-safe async traits of this crate.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Similarity search over stored document chunks.
///
/// Results are ranked by the store's own metric (most relevant first) and
/// hold at most `k` documents.
pub trait VectorStore: Send + Sync {
    fn similarity_search_with_score<'a>(
        &'a self,
        query: &'a str,
        k: u64,
    ) -> BoxFuture<'a, Result<Vec<RetrievedDocument>, RagError>>;
}

enum Backend {
    Local(LocalIndex),
    Qdrant {
        client: QdrantFacade,
        exact: bool,
    },
}

/// High-level facade that wires configuration, embedder and backend.
///
/// This is the single entry point recommended for application code.
pub struct RagStore {
    backend: Backend,
    embedder: Arc<dyn EmbeddingsProvider>,
}

impl RagStore {
    /// Opens the backend selected by `cfg`.
    ///
    /// The local backend reads its file here; the Qdrant backend only builds
    /// the client.
    ///
    /// # Errors
    /// Returns `RagError::Config` for invalid settings, and I/O or parse
    /// errors while loading the local index.
    pub fn open(cfg: &RagConfig, embedder: Arc<dyn EmbeddingsProvider>) -> Result<Self, RagError> {
        cfg.validate()?;
        let backend = match cfg.backend {
            VectorBackend::Local => {
                let index = LocalIndex::open(cfg.documents_path())?;
                info!(
                    "RagStore: local index {:?} with {} documents",
                    cfg.documents_path(),
                    index.len()
                );
                Backend::Local(index)
            }
            VectorBackend::Qdrant => Backend::Qdrant {
                client: QdrantFacade::new(cfg)?,
                exact: cfg.exact_search,
            },
        };
        Ok(Self { backend, embedder })
    }

    /// Embeds `query` and returns up to `k` documents, best first.
    ///
    /// # Errors
    /// Returns embedding errors, dimension mismatches or Qdrant failures.
    #[instrument(skip_all, fields(k = k, query_len = query.len()))]
    pub async fn search(&self, query: &str, k: u64) -> Result<Vec<RetrievedDocument>, RagError> {
        let provider = self.embedder.as_ref();
        let hits = match &self.backend {
            Backend::Local(index) => retrieve::search_local(index, provider, query, k).await?,
            Backend::Qdrant { client, exact } => {
                retrieve::search_qdrant(client, provider, query, k, *exact).await?
            }
        };
        debug!("RagStore::search returned {} documents", hits.len());
        Ok(hits)
    }
}

impl VectorStore for RagStore {
    fn similarity_search_with_score<'a>(
        &'a self,
        query: &'a str,
        k: u64,
    ) -> BoxFuture<'a, Result<Vec<RetrievedDocument>, RagError>> {
        Box::pin(self.search(query, k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Maps a few keywords onto a 2-d space.
    struct KeywordEmbedder;

    impl EmbeddingsProvider for KeywordEmbedder {
        fn embed<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<Vec<f32>, RagError>> {
            Box::pin(async move {
                if text.contains("fail") {
                    return Err(RagError::Embedding("model not loaded".into()));
                }
                Ok(if text.contains("water") {
                    vec![0.0, 1.0]
                } else {
                    vec![1.0, 0.0]
                })
            })
        }
    }

    fn local_store(rows: &str) -> (tempfile::TempDir, RagStore) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DOCUMENTS_FILE), rows).unwrap();
        let cfg = RagConfig {
            persist_dir: dir.path().to_path_buf(),
            ..RagConfig::default()
        };
        let store = RagStore::open(&cfg, Arc::new(KeywordEmbedder)).unwrap();
        (dir, store)
    }

    const ROWS: &str = r#"{"page_content":"Drip irrigation saves water.","metadata":{"id":"irr.pdf:0:0"},"embedding":[0.1,0.9]}
{"page_content":"Compost improves structure.","metadata":{"id":"soil.pdf:2:1"},"embedding":[0.9,0.1]}
"#;

    #[tokio::test]
    async fn local_search_goes_through_trait() {
        let (_dir, store) = local_store(ROWS);
        let store: Arc<dyn VectorStore> = Arc::new(store);

        let hits = store
            .similarity_search_with_score("how to save water", 5)
            .await
            .unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].source_id().as_deref(), Some("irr.pdf:0:0"));
    }

    #[tokio::test]
    async fn embedding_failure_is_a_store_error() {
        let (_dir, store) = local_store(ROWS);
        let err = store.search("please fail", 5).await.unwrap_err();
        assert!(matches!(err, RagError::Embedding(_)));
    }

    #[test]
    fn malformed_index_fails_at_open() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DOCUMENTS_FILE), "not json\n").unwrap();
        let cfg = RagConfig {
            persist_dir: dir.path().to_path_buf(),
            ..RagConfig::default()
        };
        assert!(matches!(
            RagStore::open(&cfg, Arc::new(KeywordEmbedder)),
            Err(RagError::Parse(_))
        ));
    }
}
