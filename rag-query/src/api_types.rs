//! Public API types re-used by external crates (e.g., the HTTP API layer).

/// Final answer together with the identifiers of the documents it was grounded on.
///
/// `sources[i]` is the `id` metadata of the i-th retrieved document, or
/// `None` when that document has no id.
///
/// # Example
/// ```
/// use rag_query::QaAnswer;
/// let qa = QaAnswer {
///     response: "Plant after the first rains.".into(),
///     sources: vec![Some("planting.pdf:2:0".into()), None],
/// };
/// assert_eq!(qa.sources.len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct QaAnswer {
    pub response: String,
    pub sources: Vec<Option<String>>,
}
