use std::net::SocketAddr;
use anyhow::Context;
use fjord_api::{app, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fjord_api=debug,fjord_core=debug,fjord_store=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = fjord_store::Config::load().context("Failed to load config")?;
    tracing::info!(
        "Loading {:?} dataset from {}",
        config.data.source,
        config.data.path.display()
    );

    let state = AppState::from_config(&config).context("Failed to load dataset")?;
    let app = app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
