use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use coinplan_cache::PlanCache;
use coinplan_engine::{populate, CoinDirectory, Coordinator};
use coinplan_gateway::{CoinGeckoGateway, MarketDataGateway};
use coinplan_models::CoinplanConfig;
use coinplan_server::{router, AppState};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "coinplan-server",
    about = "Crypto trade-plan server - resolves a coin, fetches recent OHLC data and serves a cached technical analysis"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/coinplan.toml")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    let gateway: Arc<dyn MarketDataGateway> = Arc::new(CoinGeckoGateway::new(&config.gateway));
    let directory = Arc::new(CoinDirectory::new());
    let cache = Arc::new(PlanCache::new(Duration::from_secs(config.cache.ttl_seconds)));
    let coordinator = Arc::new(Coordinator::new(
        directory.clone(),
        cache,
        gateway.clone(),
        config.engine.clone(),
    ));

    let cancel = CancellationToken::new();

    // One-shot catalog load; retries internally until it succeeds or
    // shutdown cancels it. Requests resolve to NotFound until then.
    tokio::spawn(populate(
        directory,
        gateway,
        Duration::from_secs(config.engine.catalog_retry_seconds),
        cancel.clone(),
    ));

    let state = AppState { coordinator };
    let app = router(state, &config.server.static_dir);

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr)
        .await
        .with_context(|| format!("Failed to bind: {}", config.server.bind_addr))?;
    tracing::info!(addr = %config.server.bind_addr, "coinplan server listening");

    let shutdown = {
        let cancel = cancel.clone();
        async move {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Received shutdown signal");
            cancel.cancel();
        }
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("Server error")?;

    Ok(())
}

fn load_config(path: &str) -> Result<CoinplanConfig> {
    match std::fs::read_to_string(path) {
        Ok(raw) => toml::from_str(&raw).with_context(|| format!("Failed to parse config: {path}")),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(path, "Config file not found, using defaults");
            Ok(CoinplanConfig::default())
        }
        Err(e) => Err(e).with_context(|| format!("Failed to read config: {path}")),
    }
}
