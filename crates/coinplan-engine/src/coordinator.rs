//! Per-request orchestration: resolve, cache lookup, fetch, analyze,
//! narrate, cache, return.

use std::sync::Arc;
use std::time::Duration;

use coinplan_cache::PlanCache;
use coinplan_gateway::{GatewayError, MarketDataGateway};
use coinplan_models::{format_price, AnalysisResult, EngineConfig};
use tracing::{debug, error, info};

use crate::analyzer::{self, PlanLevels, MIN_CANDLES};
use crate::directory::CoinDirectory;
use crate::error::EngineError;
use crate::narrative;

/// Coordinates one analysis request end to end.
///
/// The cache check, gateway fetch and cache write span suspension
/// points and are not atomic: concurrent misses on the same coin may
/// each reach the gateway, and the later write wins. That race is
/// accepted; there is no single-flight suppression.
pub struct Coordinator {
    directory: Arc<CoinDirectory>,
    cache: Arc<PlanCache>,
    gateway: Arc<dyn MarketDataGateway>,
    config: EngineConfig,
}

impl Coordinator {
    pub fn new(
        directory: Arc<CoinDirectory>,
        cache: Arc<PlanCache>,
        gateway: Arc<dyn MarketDataGateway>,
        config: EngineConfig,
    ) -> Self {
        Self {
            directory,
            cache,
            gateway,
            config,
        }
    }

    /// Run the full request flow for a user-supplied token.
    pub async fn analyze_token(&self, token: &str) -> Result<AnalysisResult, EngineError> {
        let token = token.to_lowercase();
        let coin = self
            .directory
            .resolve(&token)
            .ok_or(EngineError::CoinNotFound)?;
        debug!(token = %token, coin_id = %coin.id, "Resolved coin");

        if let Some(cached) = self.cache.get(&coin.id) {
            info!(coin_id = %coin.id, "Serving cached plan");
            return Ok(cached);
        }

        // Courtesy pause before hitting the provider on a cache miss.
        tokio::time::sleep(Duration::from_millis(self.config.courtesy_delay_ms)).await;

        let candles = self
            .gateway
            .ohlc(&coin.id, self.config.ohlc_days)
            .await
            .map_err(|e| self.gateway_error(&coin.id, e))?;
        debug!(coin_id = %coin.id, candles = candles.len(), "Fetched OHLC window");

        if candles.len() < MIN_CANDLES {
            info!(coin_id = %coin.id, candles = candles.len(), "Window too small for analysis");
            return Err(EngineError::InsufficientData {
                required: MIN_CANDLES,
                provided: candles.len(),
            });
        }

        let current_price = self
            .gateway
            .spot_price(&coin.id)
            .await
            .map_err(|e| self.gateway_error(&coin.id, e))?;

        let levels = analyzer::analyze(&candles)?;
        let text = narrative::narrate(&coin.name, current_price, &levels);
        let result = build_result(current_price, &levels, text);

        self.cache.put(&coin.id, result.clone());
        info!(coin_id = %coin.id, "Analysis complete");
        Ok(result)
    }

    fn gateway_error(&self, coin_id: &str, source: GatewayError) -> EngineError {
        // The gateway error Display carries upstream status and body.
        error!(
            coin_id,
            provider = self.gateway.name(),
            error = %source,
            "Gateway request failed"
        );
        EngineError::Gateway {
            provider: self.gateway.name().to_string(),
            source,
        }
    }
}

/// Assemble the boundary payload, rounding each level to two digits.
fn build_result(current_price: f64, levels: &PlanLevels, narrative: String) -> AnalysisResult {
    AnalysisResult {
        current_price: format_price(current_price),
        entry: format_price(levels.entry),
        exit: format_price(levels.exit),
        stop_loss: format_price(levels.stop_loss),
        take_profit_1: format_price(levels.take_profit_1),
        take_profit_2: format_price(levels.take_profit_2),
        atr: format_price(levels.atr),
        narrative,
    }
}
