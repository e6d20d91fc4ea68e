//! Read-only on-disk index: JSONL rows with precomputed embeddings.
//!
//! Row schema (one JSON object per line):
//! - `page_content` (alias `text`): chunk text
//! - `metadata`: optional object, usually carrying `id`
//! - `embedding`: the chunk vector
//!
//! Rows are loaded once; search is a brute-force cosine scan.

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::errors::RagError;
use crate::record::RetrievedDocument;

#[derive(Deserialize)]
struct StoredRow {
    #[serde(alias = "text")]
    page_content: String,
    #[serde(default)]
    metadata: Option<Map<String, Value>>,
    embedding: Vec<f32>,
}

struct Entry {
    content: String,
    metadata: Map<String, Value>,
    embedding: Vec<f32>,
    norm: f32,
}

/// In-memory copy of the persisted index.
pub struct LocalIndex {
    entries: Vec<Entry>,
    dim: Option<usize>,
}

impl LocalIndex {
    /// Loads the index from `path`.
    ///
    /// A missing file yields an empty index (searches return no documents).
    ///
    /// # Errors
    /// - [`RagError::Io`] if the file exists but cannot be read.
    /// - [`RagError::Parse`] for a malformed row or inconsistent embedding sizes.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RagError> {
        let path = path.as_ref();
        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("Local index {:?} not found, starting empty", path);
                return Ok(Self {
                    entries: Vec::new(),
                    dim: None,
                });
            }
            Err(e) => return Err(e.into()),
        };

        info!("Loading local index: {:?}", path);
        Self::from_reader(BufReader::new(file))
    }

    fn from_reader(reader: impl BufRead) -> Result<Self, RagError> {
        let mut entries = Vec::new();
        let mut dim: Option<usize> = None;

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let row: StoredRow = serde_json::from_str(&line)
                .map_err(|e| RagError::Parse(format!("line {} parse error: {}", i + 1, e)))?;

            let want = *dim.get_or_insert(row.embedding.len());
            if row.embedding.is_empty() || row.embedding.len() != want {
                return Err(RagError::Parse(format!(
                    "line {}: embedding has {} dims, expected {}",
                    i + 1,
                    row.embedding.len(),
                    want
                )));
            }

            if let Some(j) = row.embedding.iter().position(|x| !x.is_finite()) {
                return Err(RagError::Parse(format!(
                    "line {}: embedding value {} is not finite",
                    i + 1,
                    j
                )));
            }

            let norm = l2_norm(&row.embedding);
            entries.push(Entry {
                content: row.page_content,
                metadata: row.metadata.unwrap_or_default(),
                embedding: row.embedding,
                norm,
            });
        }

        debug!("Loaded {} local documents (dim={:?})", entries.len(), dim);
        Ok(Self { entries, dim })
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no documents.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns up to `top_k` documents by descending cosine similarity.
    ///
    /// Ties keep file order.
    ///
    /// # Errors
    /// [`RagError::VectorSizeMismatch`] if the query size differs from the stored vectors.
    pub fn search(&self, query: &[f32], top_k: u64) -> Result<Vec<RetrievedDocument>, RagError> {
        if let Some(want) = self.dim {
            if query.len() != want {
                return Err(RagError::VectorSizeMismatch {
                    got: query.len(),
                    want,
                });
            }
        }

        let qnorm = l2_norm(query);
        let mut scored: Vec<(f32, &Entry)> = self
            .entries
            .iter()
            .map(|e| (cosine(query, qnorm, &e.embedding, e.norm), e))
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        scored.truncate(usize::try_from(top_k).unwrap_or(usize::MAX));

        Ok(scored
            .into_iter()
            .map(|(score, e)| RetrievedDocument {
                content: e.content.clone(),
                metadata: e.metadata.clone(),
                score,
            })
            .collect())
    }
}

fn l2_norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

fn cosine(a: &[f32], norm_a: f32, b: &[f32], norm_b: f32) -> f32 {
    let denom = norm_a * norm_b;
    if denom == 0.0 {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    dot / denom
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn index(rows: &str) -> LocalIndex {
        LocalIndex::from_reader(Cursor::new(rows.to_string())).unwrap()
    }

    const ROWS: &str = r#"{"page_content":"Sorghum tolerates drought.","metadata":{"id":"crops.pdf:1:0"},"embedding":[1.0,0.0]}
{"text":"Rice needs standing water.","metadata":{"id":"crops.pdf:1:1"},"embedding":[0.0,1.0]}

{"page_content":"Millet is hardy.","embedding":[0.8,0.2]}
"#;

    #[test]
    fn ranks_by_cosine_and_truncates() {
        let idx = index(ROWS);
        assert_eq!(idx.len(), 3);

        let hits = idx.search(&[1.0, 0.0], 2).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].content, "Sorghum tolerates drought.");
        assert_eq!(hits[1].content, "Millet is hardy.");
        assert!(hits[0].score >= hits[1].score);
        assert_eq!(hits[0].source_id().as_deref(), Some("crops.pdf:1:0"));
        assert_eq!(hits[1].source_id(), None);
    }

    #[test]
    fn text_alias_is_accepted() {
        let hits = index(ROWS).search(&[0.0, 1.0], 1).unwrap();
        assert_eq!(hits[0].content, "Rice needs standing water.");
    }

    #[test]
    fn ties_keep_file_order() {
        let idx = index(
            "{\"page_content\":\"a\",\"embedding\":[1.0,0.0]}\n{\"page_content\":\"b\",\"embedding\":[2.0,0.0]}\n",
        );
        let hits = idx.search(&[3.0, 0.0], 5).unwrap();
        let order: Vec<_> = hits.iter().map(|h| h.content.as_str()).collect();
        assert_eq!(order, ["a", "b"]);
    }

    #[test]
    fn query_dimension_mismatch_is_an_error() {
        let err = index(ROWS).search(&[1.0, 0.0, 0.0], 5).unwrap_err();
        assert!(matches!(err, RagError::VectorSizeMismatch { got: 3, want: 2 }));
    }

    #[test]
    fn inconsistent_rows_fail_to_load() {
        let rows = "{\"page_content\":\"a\",\"embedding\":[1.0,0.0]}\n{\"page_content\":\"b\",\"embedding\":[1.0]}\n";
        let err = LocalIndex::from_reader(Cursor::new(rows)).err().unwrap();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn malformed_row_names_its_line() {
        let err = LocalIndex::from_reader(Cursor::new("{\"page_content\": 1}\n"))
            .err()
            .unwrap();
        assert!(matches!(err, RagError::Parse(ref m) if m.starts_with("line 1")));
    }

    #[test]
    fn overflowing_embedding_value_fails_to_load() {
        let rows: String = (0..64)
            .map(|i| {
                let x = if i % 3 == 0 { "1e39" } else { "0.5" };
                format!("{{\"page_content\":\"row {i}\",\"embedding\":[{x},0.25]}}\n")
            })
            .collect();
        let err = LocalIndex::from_reader(Cursor::new(rows)).err().unwrap();
        assert!(matches!(err, RagError::Parse(ref m) if m.starts_with("line 1")));
    }

    #[test]
    fn large_index_ranks_with_zero_vectors() {
        let rows: String = (0..64)
            .map(|i| {
                let v = if i % 3 == 0 {
                    "[0.0,0.0]".to_string()
                } else {
                    format!("[1.0,{}]", i as f32 / 64.0)
                };
                format!("{{\"page_content\":\"row {i}\",\"embedding\":{v}}}\n")
            })
            .collect();
        let idx = index(&rows);
        assert_eq!(idx.len(), 64);

        let hits = idx.search(&[1.0, 0.25], 5).unwrap();
        assert_eq!(hits.len(), 5);
        assert!(hits.windows(2).all(|w| w[0].score >= w[1].score));
        assert!(hits.iter().all(|h| h.score > 0.0));
    }

    #[test]
    fn nan_scores_do_not_break_ranking() {
        let rows: String = (0..64)
            .map(|i| format!("{{\"page_content\":\"row {i}\",\"embedding\":[1.0,{i}.0]}}\n"))
            .collect();
        let hits = index(&rows).search(&[f32::NAN, 1.0], 5).unwrap();
        assert_eq!(hits.len(), 5);
    }

    #[test]
    fn missing_file_is_an_empty_index() {
        let dir = tempfile::tempdir().unwrap();
        let idx = LocalIndex::open(dir.path().join("documents.jsonl")).unwrap();
        assert!(idx.is_empty());
        assert!(idx.search(&[0.1, 0.2, 0.3], 5).unwrap().is_empty());
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("documents.jsonl");
        std::fs::write(&path, ROWS).unwrap();
        let idx = LocalIndex::open(&path).unwrap();
        assert_eq!(idx.len(), 3);
    }
}
