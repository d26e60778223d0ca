//! In-memory coin catalog: user tokens to canonical coin identity.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use coinplan_gateway::MarketDataGateway;
use coinplan_models::CoinRecord;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// The catalog of known coins.
///
/// Empty at construction; populated once by [`populate`] and read-only
/// afterwards. Every `resolve` call fails until population succeeds.
pub struct CoinDirectory {
    coins: RwLock<Vec<CoinRecord>>,
}

impl CoinDirectory {
    pub fn new() -> Self {
        Self {
            coins: RwLock::new(Vec::new()),
        }
    }

    /// Case-insensitive lookup by name or symbol. The first matching
    /// record in catalog order wins; collisions are not disambiguated.
    pub fn resolve(&self, token: &str) -> Option<CoinRecord> {
        let token = token.to_lowercase();
        let coins = self.coins.read().unwrap_or_else(|e| e.into_inner());
        coins.iter().find(|c| c.matches(&token)).cloned()
    }

    /// Swap in a freshly loaded catalog.
    pub fn replace(&self, coins: Vec<CoinRecord>) {
        let mut guard = self.coins.write().unwrap_or_else(|e| e.into_inner());
        *guard = coins;
    }

    pub fn len(&self) -> usize {
        self.coins.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for CoinDirectory {
    fn default() -> Self {
        Self::new()
    }
}

/// Load the catalog from the gateway, retrying at a fixed interval until
/// a non-empty catalog arrives or the token is cancelled.
///
/// There is no retry cap and no backoff growth: a persistently
/// unreachable provider keeps the directory empty without crashing the
/// process.
pub async fn populate(
    directory: Arc<CoinDirectory>,
    gateway: Arc<dyn MarketDataGateway>,
    retry_interval: Duration,
    cancel: CancellationToken,
) {
    loop {
        match gateway.list_coins().await {
            Ok(coins) if !coins.is_empty() => {
                let count = coins.len();
                directory.replace(coins);
                info!(count, provider = gateway.name(), "Coin catalog loaded");
                return;
            }
            Ok(_) => {
                warn!(provider = gateway.name(), "Coin catalog fetch returned no coins");
            }
            Err(e) => {
                warn!(provider = gateway.name(), error = %e, "Coin catalog fetch failed");
            }
        }

        tokio::select! {
            _ = cancel.cancelled() => {
                info!("Catalog load cancelled before completion");
                return;
            }
            _ = tokio::time::sleep(retry_interval) => {}
        }
    }
}
