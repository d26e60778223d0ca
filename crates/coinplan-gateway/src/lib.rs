pub mod coingecko;
pub mod error;
pub mod test_support;

use async_trait::async_trait;
use coinplan_models::{Candle, CoinRecord};

pub use coingecko::CoinGeckoGateway;
pub use error::GatewayError;

/// The external market-data collaborator.
///
/// Three operations: the full coin catalog, a recent OHLC window for a
/// coin, and the current spot price. Implementations perform no retries;
/// retry policy belongs to the callers.
#[async_trait]
pub trait MarketDataGateway: Send + Sync {
    /// Human-readable provider name, used in logs and error messages.
    fn name(&self) -> &str;

    /// Fetch the full catalog of known coins.
    async fn list_coins(&self) -> Result<Vec<CoinRecord>, GatewayError>;

    /// Fetch the OHLC window for a coin, spanning the given number of
    /// days. Candles are chronological, oldest first.
    async fn ohlc(&self, coin_id: &str, days: u32) -> Result<Vec<Candle>, GatewayError>;

    /// Fetch the current spot price for a coin.
    async fn spot_price(&self, coin_id: &str) -> Result<f64, GatewayError>;
}
