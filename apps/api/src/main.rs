mod auth;
mod config;
mod db;
mod errors;
mod generation;
mod llm_client;
mod models;
mod quiz;
mod retrieval;
mod routes;
mod social;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::LlmClient;
use crate::retrieval::{GoogleArticleSearch, YoutubeSearch};
use crate::routes::build_router;
use crate::state::AppState;

const SEARCH_TIMEOUT: Duration = Duration::from_secs(15);

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

    info!("Starting Study API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (runs embedded migrations)
    let db = create_pool(&config.database_url).await?;

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Initialize search tools; missing keys degrade to empty results
    let http = reqwest::Client::builder().timeout(SEARCH_TIMEOUT).build()?;
    if config.youtube_api_key.is_none() {
        warn!("YOUTUBE_API_KEY not set; video search will return no results");
    }
    if config.google_search_api_key.is_none() || config.google_search_cx.is_none() {
        warn!("Google Custom Search not configured; article search will return no results");
    }
    let videos = YoutubeSearch::new(http.clone(), config.youtube_api_key.clone());
    let articles = GoogleArticleSearch::new(
        http,
        config.google_search_api_key.clone(),
        config.google_search_cx.clone(),
    );

    // Build app state
    let state = AppState {
        db,
        llm: Arc::new(llm),
        videos: Arc::new(videos),
        articles: Arc::new(articles),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
