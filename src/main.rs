mod telemetry;

use std::{env, sync::Arc};

use ai_llm_service::LlmServiceProfiles;
use anyhow::Context;
use api::AppState;
use rag_query::QueryHandler;
use rag_store::{OllamaConfig, OllamaEmbedder, RagConfig, RagStore};
use tracing::info;

const DEFAULT_API_ADDRESS: &str = "0.0.0.0:8000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; the process environment still applies.
    dotenvy::dotenv().ok();

    telemetry::init()?;

    let llm = Arc::new(LlmServiceProfiles::from_env().context("invalid LLM configuration")?);
    let (chat, embedding) = llm.profiles();
    info!(
        "LLM ready: chat={} embedding={} endpoint={}",
        chat.model, embedding.model, chat.endpoint
    );

    let rag_cfg = RagConfig::from_env().context("invalid vector store configuration")?;
    let embedder = Arc::new(OllamaEmbedder::new(OllamaConfig {
        svc: llm.clone(),
        dim: rag_cfg.embedding_dim,
    }));
    let store = RagStore::open(&rag_cfg, embedder).context("failed to open vector store")?;

    let handler = QueryHandler::new(Arc::new(store), llm);
    let state = Arc::new(AppState::new(handler));

    let addr = env::var("API_ADDRESS").unwrap_or_else(|_| DEFAULT_API_ADDRESS.to_string());
    api::start(&addr, state)
        .await
        .with_context(|| format!("server on {addr} failed"))?;

    Ok(())
}
