use std::{sync::Arc, time::Duration};

use anyhow::Context;
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

use fitai_chat::{
    config::Config,
    routes,
    services::gemini::GeminiProvider,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    // Refuse to start without credentials, role and model.
    let config = Config::from_env().context("invalid configuration")?;
    tracing::info!(?config, "configuration loaded");

    let provider = GeminiProvider::from_config(&config).context("failed to build Gemini client")?;
    let state = Arc::new(AppState::new(Arc::new(provider), config.session_ttl()));

    let purge_every = (config.session_ttl() / 4).max(Duration::from_secs(1));
    state.sessions.spawn_purge_task(purge_every);

    let cors = CorsLayer::very_permissive();

    let app = routes::create_router()
        .with_state(state)
        .layer(cors);

    let listener = tokio::net::TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_address()))?;

    tracing::info!("🚀 Fitness AI chat running at http://{}", config.bind_address());
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}
