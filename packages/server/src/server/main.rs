// Main entry point for the link checking server

use anyhow::{Context, Result};
use server_core::{
    server::{build_app, AppState},
    Config,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,linkcheck=debug,server_core=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting link checker");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        min_chars = config.min_chars,
        max_urls = config.max_urls,
        fetch_timeout_secs = config.fetch_timeout.as_secs(),
        batch_deadline_secs = config.batch_deadline.map(|d| d.as_secs()),
        "Configuration loaded"
    );

    let addr = config.listen_addr();
    let port = config.port;

    // Build application
    let state = AppState::from_config(config)?;
    let app = build_app(state);

    // Start server
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
