//! Core data models used by the library.

use serde_json::{Map, Value};

/// One document chunk returned by a similarity search.
///
/// `score` is whatever the backend reports; it is never re-ranked here.
#[derive(Clone, Debug, PartialEq)]
pub struct RetrievedDocument {
    pub content: String,
    pub metadata: Map<String, Value>,
    pub score: f32,
}

impl RetrievedDocument {
    /// The `id` metadata field rendered as a string.
    ///
    /// Strings are returned as-is, numbers and booleans in their JSON text
    /// form. Missing, `null`, object and array ids yield `None`.
    pub fn source_id(&self) -> Option<String> {
        match self.metadata.get("id")? {
            Value::String(s) => Some(s.clone()),
            v @ (Value::Number(_) | Value::Bool(_)) => Some(v.to_string()),
            _ => None,
        }
    }
}
