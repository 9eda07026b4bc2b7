use anyhow::{Context, Result};
use formcraft::config::{Config, DEFAULT_CONFIG_PATH};
use formcraft_server::{router, AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config_path = std::env::var("FORMCRAFT_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = Config::load(&config_path)?.with_env()?;

    info!(config = %config_path, backend = %config.backend.base_url, "formcraft starting");

    let state = AppState::from_config(&config).context("Failed to create backend client")?;
    let app = router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server running at http://{}", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
