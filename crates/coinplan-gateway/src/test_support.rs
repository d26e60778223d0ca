//! Test support: a canned in-memory gateway.
//!
//! `StaticGateway` serves a fixed catalog, OHLC window and spot price,
//! counts invocations per operation, and can inject failures per
//! operation. Engine and server tests use it in place of the real
//! provider.

use std::sync::Mutex;

use async_trait::async_trait;
use coinplan_models::{Candle, CoinRecord};

use crate::error::GatewayError;
use crate::MarketDataGateway;

#[derive(Default)]
struct CallCounts {
    list_coins: usize,
    ohlc: usize,
    spot_price: usize,
}

/// A gateway returning pre-configured data.
pub struct StaticGateway {
    coins: Vec<CoinRecord>,
    candles: Vec<Candle>,
    price: f64,
    fail_list_coins: bool,
    fail_ohlc: bool,
    fail_spot_price: bool,
    counts: Mutex<CallCounts>,
}

impl StaticGateway {
    pub fn new() -> Self {
        Self {
            coins: Vec::new(),
            candles: Vec::new(),
            price: 0.0,
            fail_list_coins: false,
            fail_ohlc: false,
            fail_spot_price: false,
            counts: Mutex::new(CallCounts::default()),
        }
    }

    pub fn with_coins(mut self, coins: Vec<CoinRecord>) -> Self {
        self.coins = coins;
        self
    }

    pub fn with_candles(mut self, candles: Vec<Candle>) -> Self {
        self.candles = candles;
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    pub fn failing_list_coins(mut self) -> Self {
        self.fail_list_coins = true;
        self
    }

    pub fn failing_ohlc(mut self) -> Self {
        self.fail_ohlc = true;
        self
    }

    pub fn failing_spot_price(mut self) -> Self {
        self.fail_spot_price = true;
        self
    }

    pub fn list_coins_calls(&self) -> usize {
        self.counts.lock().unwrap_or_else(|e| e.into_inner()).list_coins
    }

    pub fn ohlc_calls(&self) -> usize {
        self.counts.lock().unwrap_or_else(|e| e.into_inner()).ohlc
    }

    pub fn spot_price_calls(&self) -> usize {
        self.counts.lock().unwrap_or_else(|e| e.into_inner()).spot_price
    }

    fn injected_failure() -> GatewayError {
        GatewayError::Status {
            status: 500,
            body: "injected failure".to_string(),
        }
    }
}

impl Default for StaticGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketDataGateway for StaticGateway {
    fn name(&self) -> &str {
        "StaticGateway"
    }

    async fn list_coins(&self) -> Result<Vec<CoinRecord>, GatewayError> {
        self.counts.lock().unwrap_or_else(|e| e.into_inner()).list_coins += 1;
        if self.fail_list_coins {
            return Err(Self::injected_failure());
        }
        Ok(self.coins.clone())
    }

    async fn ohlc(&self, _coin_id: &str, _days: u32) -> Result<Vec<Candle>, GatewayError> {
        self.counts.lock().unwrap_or_else(|e| e.into_inner()).ohlc += 1;
        if self.fail_ohlc {
            return Err(Self::injected_failure());
        }
        Ok(self.candles.clone())
    }

    async fn spot_price(&self, _coin_id: &str) -> Result<f64, GatewayError> {
        self.counts.lock().unwrap_or_else(|e| e.into_inner()).spot_price += 1;
        if self.fail_spot_price {
            return Err(Self::injected_failure());
        }
        Ok(self.price)
    }
}

/// A linear window of `len` candles: lows rise from 100, highs sit 10
/// above the lows, closes in between. Enough structure for level and
/// ATR assertions without hand-writing every test window.
pub fn sample_window(len: usize) -> Vec<Candle> {
    (0..len)
        .map(|i| {
            let base = 100.0 + i as f64;
            Candle {
                timestamp: 1_700_000_000_000 + i as i64 * 86_400_000,
                open: base + 2.0,
                high: base + 10.0,
                low: base,
                close: base + 5.0,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn counts_invocations() {
        let gateway = StaticGateway::new().with_price(42.0);
        gateway.spot_price("bitcoin").await.unwrap();
        gateway.spot_price("bitcoin").await.unwrap();
        assert_eq!(gateway.spot_price_calls(), 2);
        assert_eq!(gateway.ohlc_calls(), 0);
    }

    #[tokio::test]
    async fn injected_failure_still_counts() {
        let gateway = StaticGateway::new().failing_ohlc();
        assert!(gateway.ohlc("bitcoin", 30).await.is_err());
        assert_eq!(gateway.ohlc_calls(), 1);
    }

    #[test]
    fn sample_window_is_chronological() {
        let window = sample_window(5);
        assert_eq!(window.len(), 5);
        assert!(window.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
        assert_eq!(window[0].low, 100.0);
        assert_eq!(window[4].high, 114.0);
    }
}
