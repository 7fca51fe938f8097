use anyhow::Context;
use face_match_demo::{
    build_router,
    services::JsonFileStore,
    AppState, Config,
};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;

    // Make sure the users file exists before the first request
    let store = JsonFileStore::open(&config.storage.data_file)
        .context("Failed to initialize users file")?;
    let data_file = store.path().to_path_buf();

    let state = AppState::new(Arc::new(store), config.matching);
    let app = build_router(state, &config.static_files.dir, config.server.max_body_bytes);

    let listener = tokio::net::TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address()))?;

    tracing::info!("Server running on http://localhost:{}", config.server.port);
    tracing::info!("Users file: {}", data_file.display());

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
