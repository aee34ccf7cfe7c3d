//! Policy RAG server binary
//!
//! Run with: cargo run -p policy-rag --bin policy-rag-server
//!
//! Set POLICY_RAG_CONFIG to a TOML file to override the defaults.

use policy_rag::{config::RagConfig, server::RagServer};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "policy_rag=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_path = std::env::var_os("POLICY_RAG_CONFIG").map(PathBuf::from);
    let config = RagConfig::load(config_path.as_deref())?;

    tracing::info!("Configuration loaded");
    tracing::info!("  - Embedding model: {}", config.embeddings.model);
    tracing::info!("  - Embedding dimensions: {}", config.embeddings.dimensions);
    tracing::info!("  - LLM provider: {:?}", config.llm.provider);
    tracing::info!(
        "  - Chunk size: {} words, overlap {}",
        config.chunking.chunk_size,
        config.chunking.chunk_overlap
    );
    tracing::info!("  - Vector index: {}", config.vector_db.storage_path.display());

    let server = RagServer::new(config).await?;

    let (embeddings_ok, llm_ok) = server.state().pipeline().health_check().await;
    if !embeddings_ok {
        tracing::warn!(
            "Embedding service not available at {}",
            server.state().config().embeddings.base_url
        );
        tracing::warn!("  Start Ollama and pull the model: ollama pull nomic-embed-text");
    }
    if !llm_ok {
        tracing::warn!("Language model not available; queries will return fallback decisions");
    }

    println!("\nServer starting...");
    println!("  API: http://{}", server.address());
    println!("  Health: http://{}/health", server.address());
    println!("  API Info: http://{}/api/info", server.address());
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
