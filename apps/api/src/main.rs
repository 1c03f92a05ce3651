mod config;
mod enhance;
mod errors;
mod export;
mod layout;
mod llm;
mod models;
mod render;
mod routes;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::enhance::TextEnhancer;
use crate::layout::{default_layout_config, LayoutEngine};
use crate::llm::GeminiClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{DocumentStore, FileStorage};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Studio API v{}", env!("CARGO_PKG_VERSION"));

    // Open the document store (loads persisted state or defaults)
    let storage = FileStorage::open(&config.data_dir)?;
    let store = Arc::new(DocumentStore::open(storage));
    info!("Document store ready (data dir: {})", config.data_dir.display());

    // Initialize the LLM-backed enhancer, if a credential is configured
    let enhancer: Option<Arc<dyn TextEnhancer>> = match config.gemini_api_key.clone() {
        Some(key) => {
            info!("Text enhancement enabled (model: {})", llm::MODEL);
            Some(Arc::new(GeminiClient::new(key)))
        }
        None => {
            warn!("GEMINI_API_KEY is not set; /api/enhance will answer 500 until it is configured");
            None
        }
    };

    // Layout engine for preview geometry (A4 at 96dpi, Helvetica metrics)
    let layout = LayoutEngine::new(default_layout_config());
    info!(
        "Layout canvas: {}px wide, {}px margins",
        layout.config().width_px,
        layout.config().margin_px
    );

    // Build app state
    let state = AppState {
        store,
        enhancer,
        layout,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // single-user local service

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
