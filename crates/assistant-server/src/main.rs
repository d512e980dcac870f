//! NEAR Swap Assistant HTTP Server
//!
//! Axum-based server exposing the assistant over a small REST API.

mod handlers;
mod state;

use std::sync::Arc;

use axum::{routing::{get, post}, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use assistant_core::{DocumentSearch, LlmProvider};
use assistant_runtime::{OllamaEmbedder, OllamaProvider, QdrantConfig, QdrantSearch};
use swap_assistant::{price::CoinMarketCapSource, Assistant, AssistantConfig};

use crate::handlers::{chat_handler, health_check, price_handler};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    let config = AssistantConfig::from_env()?;

    // Price source
    let price_source = Arc::new(CoinMarketCapSource::new(&config.price));
    if config.price.api_key.is_some() {
        tracing::info!("✓ CoinMarketCap configured");
    } else {
        tracing::warn!("⚠ CMC_API_KEY not set - quotes use the fallback price ({})", config.price.fallback_price);
    }

    // Completion provider
    let ollama = OllamaProvider::from_env();
    let provider: Option<Arc<dyn LlmProvider>> = match ollama.health_check().await {
        Ok(true) => {
            tracing::info!("✓ Connected to Ollama");
            if let Ok(models) = ollama.list_models().await {
                for model in models {
                    tracing::info!("  Model: {}", model.name);
                }
            }
            Some(Arc::new(ollama))
        }
        Ok(false) | Err(_) => {
            tracing::warn!("⚠ Ollama not available - knowledge answers use raw doc excerpts");
            tracing::warn!("  Make sure Ollama is running: ollama serve");
            None
        }
    };

    // Document search
    let search: Option<Arc<dyn DocumentSearch>> = QdrantConfig::from_env().map(|qdrant| {
        tracing::info!("✓ Qdrant search on collection '{}'", qdrant.collection);
        let embedder = Arc::new(OllamaEmbedder::from_env());
        Arc::new(QdrantSearch::new(qdrant, embedder)) as Arc<dyn DocumentSearch>
    });
    if search.is_none() {
        tracing::warn!("⚠ QDRANT_URL not set - knowledge answers limited to the FAQ");
    }

    // Assemble the assistant
    let mut builder = Assistant::builder()
        .config(config)
        .price_source(price_source);
    if let Some(search) = search {
        builder = builder.search(search);
    }
    if let Some(provider) = &provider {
        builder = builder.completion(provider.clone());
    }

    let state = AppState {
        assistant: Arc::new(builder.build()?),
        provider,
    };

    let app = router(state);

    // Start server
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 swap assistant running on http://{}", addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health              - Health check");
    tracing::info!("  POST /api/chat            - Send message");
    tracing::info!("  GET  /api/price/{{symbol}}  - USD price lookup");
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}

/// All routes with CORS and request tracing
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/chat", post(chat_handler))
        .route("/api/price/{symbol}", get(price_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
