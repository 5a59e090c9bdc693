mod ai_client;
mod auth;
mod campaigns;
mod config;
mod content;
mod db;
mod errors;
mod models;
mod routes;
mod seed;
mod state;
mod users;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::ai_client::clipdrop::ClipDropClient;
use crate::ai_client::{GeminiClient, TextGenerator};
use crate::config::Config;
use crate::db::create_pool;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting AdForge API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Providers are optional: the service runs in offline/demo mode without them
    let text_provider: Option<Arc<dyn TextGenerator>> = match &config.gemini_api_key {
        Some(key) => {
            info!("Text generation enabled (model: {})", ai_client::MODEL);
            Some(Arc::new(GeminiClient::new(key.clone())))
        }
        None => {
            info!("No GOOGLE_GEMINI_API_KEY set, text generation runs in fallback mode");
            None
        }
    };

    let image_client = match &config.clipdrop_api_key {
        Some(key) => {
            info!("Image generation enabled");
            Some(Arc::new(ClipDropClient::new(key.clone())))
        }
        None => {
            info!("No CLIPDROP_API_KEY set, image generation serves placeholders");
            None
        }
    };

    if config.seed_sample_data {
        seed::seed_sample_data(&db).await?;
    }

    // Build app state
    let state = AppState {
        db,
        text_provider,
        image_client,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
