//! Retrieval helpers: embed the query, search the backend, normalize hits.

use serde_json::{Map, Value};
use tracing::trace;

use crate::embed::EmbeddingsProvider;
use crate::errors::RagError;
use crate::local_index::LocalIndex;
use crate::qdrant_facade::QdrantFacade;
use crate::record::RetrievedDocument;

/// Payload keys holding the chunk text, in lookup order.
const CONTENT_KEYS: [&str; 2] = ["page_content", "text"];

/// Embeds `query` and searches the on-disk index.
pub async fn search_local(
    index: &LocalIndex,
    provider: &dyn EmbeddingsProvider,
    query: &str,
    top_k: u64,
) -> Result<Vec<RetrievedDocument>, RagError> {
    let qv = provider.embed(query).await?;
    let hits = index.search(&qv, top_k)?;
    trace!("retrieve::search_local hits={}", hits.len());
    Ok(hits)
}

/// Embeds `query`, searches Qdrant and maps payloads to documents.
pub async fn search_qdrant(
    client: &QdrantFacade,
    provider: &dyn EmbeddingsProvider,
    query: &str,
    top_k: u64,
    exact: bool,
) -> Result<Vec<RetrievedDocument>, RagError> {
    let qv = provider.embed(query).await?;
    let hits = client.search(qv, top_k, exact).await?;

    let out: Vec<_> = hits
        .into_iter()
        .map(|(score, payload)| payload_to_document(score, payload))
        .collect();
    trace!("retrieve::search_qdrant hits={}", out.len());
    Ok(out)
}

/// Splits a point payload into content and metadata.
///
/// The content comes from `page_content` (or `text`). Metadata is the
/// nested `metadata` object when present, otherwise the remaining keys.
pub(crate) fn payload_to_document(score: f32, mut payload: Map<String, Value>) -> RetrievedDocument {
    let content = CONTENT_KEYS
        .iter()
        .find_map(|k| payload.remove(*k))
        .map(|v| match v {
            Value::String(s) => s,
            Value::Null => String::new(),
            other => other.to_string(),
        })
        .unwrap_or_default();

    let metadata = match payload.remove("metadata") {
        Some(Value::Object(m)) => m,
        Some(other) => {
            payload.insert("metadata".to_string(), other);
            payload
        }
        None => payload,
    };

    RetrievedDocument {
        content,
        metadata,
        score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(v: Value) -> Map<String, Value> {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn nested_metadata_object_is_used() {
        let d = payload_to_document(
            0.7,
            obj(json!({
                "page_content": "Apply lime to acidic soil.",
                "metadata": { "id": "soil.pdf:4:2", "source": "soil.pdf" }
            })),
        );
        assert_eq!(d.content, "Apply lime to acidic soil.");
        assert_eq!(d.source_id().as_deref(), Some("soil.pdf:4:2"));
        assert_eq!(d.metadata.len(), 2);
        assert_eq!(d.score, 0.7);
    }

    #[test]
    fn flat_payload_becomes_metadata() {
        let d = payload_to_document(
            0.1,
            obj(json!({ "text": "Rotate legumes.", "id": "r1", "page": 2 })),
        );
        assert_eq!(d.content, "Rotate legumes.");
        assert_eq!(d.metadata, obj(json!({ "id": "r1", "page": 2 })));
    }

    #[test]
    fn missing_content_is_empty() {
        let d = payload_to_document(0.0, obj(json!({ "id": "x" })));
        assert_eq!(d.content, "");
        assert_eq!(d.source_id().as_deref(), Some("x"));
    }
}
