use serde::{Deserialize, Serialize};

/// Request payload for /query/.
#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    /// Natural language question.
    pub query: String,
}

/// Response payload for /query/.
#[derive(Debug, Serialize)]
pub struct QueryResponse {
    /// Model answer (plain text).
    pub response: String,
    /// `metadata.id` of each retrieved document, in retrieval order.
    pub sources: Vec<Option<String>>,
}
