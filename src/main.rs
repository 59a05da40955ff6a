use std::{sync::Arc, time::Duration};

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use hybrid_movie_api::{
    api::{create_router, AppState},
    config::Config,
    data::{TitleModel, VibeModel},
    services::{
        providers::{OllamaEmbedder, TmdbPosterProvider},
        Recommender,
    },
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // Both models must load and agree on their dimensions before serving
    let title_model = TitleModel::load(&config.title_model_path)
        .with_context(|| format!("Failed to load title model from {}", config.title_model_path))?;
    let vibe_model = VibeModel::load(&config.vibe_model_path)
        .with_context(|| format!("Failed to load vibe model from {}", config.vibe_model_path))?;

    let embedder = OllamaEmbedder::new(
        config.embedding_api_url.clone(),
        config.embedding_model.clone(),
        Duration::from_secs(config.embedding_timeout_secs),
    )?;
    let posters = TmdbPosterProvider::new(
        config.tmdb_api_key(),
        config.tmdb_api_url.clone(),
        config.tmdb_image_base.clone(),
        Duration::from_secs(config.poster_timeout_secs),
    )?;

    let recommender = Recommender::new(
        Arc::new(title_model),
        Arc::new(vibe_model),
        Arc::new(embedder),
        config.default_top_n,
    );
    let state = AppState::new(recommender, Arc::new(posters));
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(address = %addr, "Server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Session ended");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
