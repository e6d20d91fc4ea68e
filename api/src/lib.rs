//! HTTP surface of the chat backend.
//!
//! Routes:
//! - `GET /`: welcome message
//! - `POST /query/` (and `/query`): answer a question with RAG context

mod app_state;
pub mod error_handler;
mod routes;

pub use app_state::AppState;
pub use error_handler::{AppError, AppResult};

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};

use crate::routes::{query::query_route::query, root_route::root};

/// Builds the application router over the shared state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/query/", post(query))
        .route("/query", post(query))
        .with_state(state)
}

/// Binds `addr` and serves until Ctrl+C.
///
/// # Errors
/// [`AppError::Bind`] if the address cannot be bound, [`AppError::Server`]
/// if the server stops with an I/O error.
pub async fn start(addr: &str, state: Arc<AppState>) -> Result<(), AppError> {
    let listener = TcpListener::bind(addr).await.map_err(AppError::Bind)?;
    info!("AgriChatBot API listening on {addr}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("server stopped");
    Ok(())
}

/// Resolves when Ctrl+C is pressed.
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        // Without a signal handler the server runs until killed.
        warn!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
