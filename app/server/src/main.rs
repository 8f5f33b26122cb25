use anyhow::{Context, Result};
use rustls::crypto::ring::default_provider;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use btc_canister_api::balance::BalanceSource;
use btc_canister_api::canister::CanisterBalanceSource;
use btc_canister_api::config::{CanisterConfig, Config};
use btc_canister_api::routes;
use btc_canister_api::server::Server;
use btc_canister_api::state::AppState;

const DEFAULT_LOG_FILTER: &str = "btc_canister_api=info,tower_http=info";

fn install_crypto_provider() {
    // Safe to call once; ignore error if already installed
    let _ = default_provider().install_default();
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn connect_balance_source(config: &CanisterConfig) -> Result<Arc<dyn BalanceSource>> {
    let canister =
        CanisterBalanceSource::new(&config.url, config.canister_id, config.fetch_root_key)
            .await
            .context("Failed to initialize canister balance source")?;
    info!(
        "Balance lookups go to canister {} via {}",
        canister.canister_id(),
        config.url
    );
    Ok(Arc::new(canister))
}

#[tokio::main]
async fn main() -> Result<()> {
    install_crypto_provider();
    init_tracing();

    info!("Bitcoin Canister API starting...");

    let config = Config::from_env().context("Invalid configuration")?;
    info!(
        "Bitcoin network: {} (key name {})",
        config.network,
        config.network.key_name()
    );
    info!("Serving static files from {}", config.static_dir.display());

    let balances = connect_balance_source(&config.canister).await?;
    let state = AppState::new(balances, config.network);
    let router = routes::create_router(state, &config.static_dir);

    Server::new(config.server).run(router).await
}
