use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use church_dashboard::config::DashboardConfig;
use church_dashboard::{create_router, initialize_backend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging; RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Loading configuration");
    let config = DashboardConfig::load_with_dotenv().context("failed to load configuration")?;
    let addr = config.bind_addr()?;

    let app_state = initialize_backend(&config).await?;
    let app = create_router(app_state, &config.server)?;

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
