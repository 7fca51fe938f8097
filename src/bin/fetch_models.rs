use face_match_demo::{services::ModelFetcher, Config};
use tracing_subscriber::EnvFilter;

// Exits successfully even when a download fails; the error is logged.
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return;
        }
    };

    let fetcher = ModelFetcher::new(&config.models.dir);
    if let Err(e) = fetcher.download_all(&config.models.urls).await {
        tracing::error!("Error downloading models: {}", e);
    }
}
