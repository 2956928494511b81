use std::net::SocketAddr;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use clipsynth_server::{AppState, ServerConfig, router};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env()?;

    // A configured provider without its key is a misconfiguration; fail
    // at startup rather than on the first request.
    if let Some(provider) = &config.provider {
        provider.validate_api_key()?;
        info!(provider = provider.name(), "generative provider configured");
    } else {
        info!("no provider configured, using deterministic local strategies");
    }

    tokio::fs::create_dir_all(&config.uploads_dir).await?;

    let state = AppState::new(&config);
    let app = router(state, &config.uploads_dir, config.max_upload_bytes);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("clipsynth server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
