use registration_intake::config::AppConfig;
use registration_intake::{create_router, initialize_backend};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load()?;
    info!("Loaded configuration: {:?}", config);

    let app_state = initialize_backend(&config).await?;
    let app = create_router(app_state, &config)?;

    info!("Starting server on {}:{}", config.host, config.port);
    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
    info!("Server running on http://localhost:{}", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
