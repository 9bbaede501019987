use anyhow::Context;
use happyhour_api::{app, worker, AppState};
use happyhour_store::{app_config::Config, source_from_config};
use std::net::SocketAddr;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "happyhour_api=debug,happyhour_store=debug,happyhour_core=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    let source = source_from_config(&config.source).context("Failed to configure deal source")?;
    tracing::info!("Starting Happy Hour API on port {} ({})", config.server.port, source.describe());

    let state = AppState::new(source, config.features.invalid_expiration);

    // Start serving even if the sheet is down; the listing is empty until a refresh succeeds
    if let Err(e) = state.store.refresh(state.source.as_ref()).await {
        tracing::warn!("Initial deal load from {} failed: {}", state.source.describe(), e);
    }

    if config.source.refresh_interval_seconds > 0 {
        tokio::spawn(worker::start_refresh_worker(
            state.clone(),
            Duration::from_secs(config.source.refresh_interval_seconds),
        ));
    }

    let app = app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
