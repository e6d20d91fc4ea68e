//! Runtime configuration for the vector store.

use std::path::PathBuf;
use std::str::FromStr;

use crate::errors::RagError;

/// Default on-disk index location for the local backend.
pub const DEFAULT_PERSIST_DIR: &str = "chroma";

/// File inside the persist directory holding one document per line.
pub const DOCUMENTS_FILE: &str = "documents.jsonl";

/// Which index answers similarity searches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VectorBackend {
    /// JSONL rows with embeddings loaded from `persist_dir` at startup.
    Local,
    /// A remote Qdrant collection.
    Qdrant,
}

impl FromStr for VectorBackend {
    type Err = RagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "qdrant" => Ok(Self::Qdrant),
            other => Err(RagError::Config(format!(
                "unsupported VECTOR_BACKEND `{other}` (expected `local` or `qdrant`)"
            ))),
        }
    }
}

/// Configuration for RAG retrieval.
#[derive(Clone, Debug)]
pub struct RagConfig {
    /// Backend used for similarity search.
    pub backend: VectorBackend,
    /// Directory of the persisted local index.
    pub persist_dir: PathBuf,
    /// Qdrant gRPC endpoint, e.g. `http://localhost:6334`.
    pub qdrant_url: String,
    /// Optional API key for Qdrant Cloud.
    pub qdrant_api_key: Option<String>,
    /// Target collection name.
    pub collection: String,
    /// Exact search flag (false = HNSW ANN).
    pub exact_search: bool,
    /// Expected query embedding size; `None` skips the check.
    pub embedding_dim: Option<usize>,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            backend: VectorBackend::Local,
            persist_dir: PathBuf::from(DEFAULT_PERSIST_DIR),
            qdrant_url: "http://127.0.0.1:6334".to_string(),
            qdrant_api_key: None,
            collection: "agri_docs".to_string(),
            exact_search: false,
            embedding_dim: None,
        }
    }
}

impl RagConfig {
    /// Builds the config from environment variables, keeping defaults for
    /// anything unset.
    ///
    /// Variables: `VECTOR_BACKEND`, `RAG_PERSIST_DIR`, `QDRANT_URL`,
    /// `QDRANT_API_KEY`, `QDRANT_COLLECTION`, `RAG_EXACT_SEARCH`, `EMBEDDING_DIM`.
    ///
    /// # Errors
    /// Returns `RagError::Config` for an unknown backend, a non-numeric
    /// `EMBEDDING_DIM`, or values rejected by [`RagConfig::validate`].
    pub fn from_env() -> Result<Self, RagError> {
        let mut cfg = Self::default();

        if let Some(v) = env_nonempty("VECTOR_BACKEND") {
            cfg.backend = v.parse()?;
        }
        if let Some(v) = env_nonempty("RAG_PERSIST_DIR") {
            cfg.persist_dir = PathBuf::from(v);
        }
        if let Some(v) = env_nonempty("QDRANT_URL") {
            cfg.qdrant_url = v;
        }
        cfg.qdrant_api_key = env_nonempty("QDRANT_API_KEY");
        if let Some(v) = env_nonempty("QDRANT_COLLECTION") {
            cfg.collection = v;
        }
        if let Some(v) = env_nonempty("RAG_EXACT_SEARCH") {
            cfg.exact_search = v.trim() == "true";
        }
        if let Some(v) = env_nonempty("EMBEDDING_DIM") {
            let dim = v
                .trim()
                .parse::<usize>()
                .map_err(|_| RagError::Config(format!("EMBEDDING_DIM is not a number: `{v}`")))?;
            cfg.embedding_dim = Some(dim);
        }

        cfg.validate()?;
        Ok(cfg)
    }

    /// Path of the JSONL file read by the local backend.
    pub fn documents_path(&self) -> PathBuf {
        self.persist_dir.join(DOCUMENTS_FILE)
    }

    /// Validates config values for the selected backend.
    pub fn validate(&self) -> Result<(), RagError> {
        if self.embedding_dim == Some(0) {
            return Err(RagError::Config("embedding_dim must be > 0".into()));
        }
        match self.backend {
            VectorBackend::Local => {
                if self.persist_dir.as_os_str().is_empty() {
                    return Err(RagError::Config("persist_dir is empty".into()));
                }
            }
            VectorBackend::Qdrant => {
                if self.qdrant_url.trim().is_empty() {
                    return Err(RagError::Config("qdrant_url is empty".into()));
                }
                if self.collection.trim().is_empty() {
                    return Err(RagError::Config("collection is empty".into()));
                }
            }
        }
        Ok(())
    }
}

fn env_nonempty(k: &str) -> Option<String> {
    std::env::var(k).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_names_parse_case_insensitively() {
        assert_eq!("local".parse::<VectorBackend>().unwrap(), VectorBackend::Local);
        assert_eq!(" Qdrant ".parse::<VectorBackend>().unwrap(), VectorBackend::Qdrant);
        assert!(matches!(
            "chroma".parse::<VectorBackend>(),
            Err(RagError::Config(_))
        ));
    }

    #[test]
    fn default_points_at_local_documents_file() {
        let cfg = RagConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.documents_path(), PathBuf::from("chroma").join("documents.jsonl"));
    }

    #[test]
    fn qdrant_backend_requires_collection() {
        let cfg = RagConfig {
            backend: VectorBackend::Qdrant,
            collection: " ".into(),
            ..RagConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(RagError::Config(_))));
    }

    #[test]
    fn zero_dimension_is_rejected() {
        let cfg = RagConfig {
            embedding_dim: Some(0),
            ..RagConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
