use std::sync::Arc;

use rag_query::QueryHandler;

/// Shared state for all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Retrieval + generation pipeline, built once at startup.
    pub handler: Arc<QueryHandler>,
}

impl AppState {
    pub fn new(handler: QueryHandler) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }
}
