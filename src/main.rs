mod api_doc;
mod app;
mod config;
mod error;
mod frontend;
mod handlers;
mod itinerary;
mod models;
mod planets;
mod planner;
mod prices;
mod routes;
mod state;
mod store;

use anyhow::Context;
use config::Config;
use prices::PriceSource;
use store::Store;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!("space-travel-planner starting");

    let config = Config::from_env()?;
    config.log_startup();

    let store = Store::from_config(&config).await?;
    let source = PriceSource::from_config(&config)?;

    tokio::spawn(prices::run_refresher(
        store.clone(),
        source,
        config.max_pricelists,
        config.retry_delay,
    ));

    let addr = format!("{}:{}", config.service_host, config.service_port);
    let state = app::build_state(store, config)?;
    let router = app::build_router(state)?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("space-travel-planner stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
