//! POST /query/ — answers a question with RAG context.

use std::sync::Arc;

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use rag_query::QaAnswer;
use tracing::info;

use crate::{
    app_state::AppState,
    error_handler::AppResult,
    routes::query::query_request::{QueryRequest, QueryResponse},
};

/// Handler: POST /query/
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8000/query/ \
///   -H 'content-type: application/json' \
///   -d '{"query":"How do I control fall armyworm in maize?"}'
/// ```
pub async fn query(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<QueryRequest>, JsonRejection>,
) -> AppResult<Json<QueryResponse>> {
    let Json(body) = payload?;
    info!("POST /query/ ({} chars)", body.query.len());

    let QaAnswer { response, sources } = state.handler.answer(&body.query).await?;

    Ok(Json(QueryResponse { response, sources }))
}
