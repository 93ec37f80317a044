mod artifacts;
mod config;
mod errors;
mod generation;
mod layout;
mod llm_client;
mod models;
mod rate_limit;
mod render;
mod routes;
mod sanitize;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::artifacts::ArtifactStore;
use crate::config::Config;
use crate::layout::StyleSheets;
use crate::llm_client::LlmClient;
use crate::rate_limit::RateLimiter;
use crate::render::FontSource;
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

    info!("Starting CVespresso API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(config.groq_api_key.clone()).context("Failed to build LLM client")?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Stylesheets: presets, optionally patched from STYLESHEET_PATH
    let styles = StyleSheets::load(config.stylesheet_path.as_deref())?;
    if let Some(path) = &config.stylesheet_path {
        info!("Stylesheet overrides loaded from {}", path.display());
    }

    if !config.font_path.exists() {
        warn!(
            "Font file {} not found; document requests will fail until it is provided",
            config.font_path.display()
        );
    }
    let font = FontSource::File(config.font_path.clone());

    // Artifact store + orphan sweeper
    let artifacts = ArtifactStore::new(config.artifact_dir.clone());
    artifacts.clone().spawn_sweeper(
        Duration::from_secs(config.artifact_sweep_interval_secs),
        Duration::from_secs(config.artifact_max_age_secs),
    );
    info!("Artifacts written to {}", artifacts.dir().display());

    let limiter = RateLimiter::new(config.rate_limit_per_minute);
    spawn_limiter_pruning(limiter.clone());
    info!("Rate limit: {} requests/minute per client", limiter.per_minute());

    // Build app state
    let state = AppState {
        llm: Arc::new(llm),
        limiter,
        artifacts,
        styles: Arc::new(styles),
        font,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Drops elapsed rate-limit windows once a minute.
fn spawn_limiter_pruning(limiter: RateLimiter) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(60));
        loop {
            ticker.tick().await;
            limiter.prune();
        }
    });
}
