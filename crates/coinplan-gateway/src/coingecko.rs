use std::collections::HashMap;

use async_trait::async_trait;
use coinplan_models::{Candle, CoinRecord, GatewayConfig};
use reqwest::Response;

use crate::error::GatewayError;
use crate::MarketDataGateway;

/// CoinGecko-backed gateway.
///
/// Outbound calls carry no client-side timeout; a hung upstream stalls
/// only the issuing request's task.
pub struct CoinGeckoGateway {
    client: reqwest::Client,
    base_url: String,
    vs_currency: String,
    provider_name: String,
}

impl CoinGeckoGateway {
    pub fn new(config: &GatewayConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            vs_currency: config.vs_currency.clone(),
            provider_name: config.provider_name.clone(),
        }
    }

    /// Resolve a non-2xx response into `GatewayError::Status`, keeping
    /// the upstream body for diagnosis.
    async fn check_status(response: Response) -> Result<Response, GatewayError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(GatewayError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl MarketDataGateway for CoinGeckoGateway {
    fn name(&self) -> &str {
        &self.provider_name
    }

    async fn list_coins(&self) -> Result<Vec<CoinRecord>, GatewayError> {
        let url = format!("{}/coins/list", self.base_url);
        let response = self.client.get(&url).send().await?;
        let response = Self::check_status(response).await?;
        let coins: Vec<CoinRecord> = response.json().await?;
        tracing::debug!(count = coins.len(), "Fetched coin catalog");
        Ok(coins)
    }

    async fn ohlc(&self, coin_id: &str, days: u32) -> Result<Vec<Candle>, GatewayError> {
        let url = format!(
            "{}/coins/{coin_id}/ohlc?vs_currency={}&days={days}",
            self.base_url, self.vs_currency
        );
        let response = self.client.get(&url).send().await?;
        let response = Self::check_status(response).await?;
        let rows: Vec<[f64; 5]> = response.json().await?;
        tracing::debug!(coin_id, candles = rows.len(), "Fetched OHLC window");
        Ok(rows.into_iter().map(Candle::from_row).collect())
    }

    async fn spot_price(&self, coin_id: &str) -> Result<f64, GatewayError> {
        let url = format!(
            "{}/simple/price?ids={coin_id}&vs_currencies={}",
            self.base_url, self.vs_currency
        );
        let response = self.client.get(&url).send().await?;
        let response = Self::check_status(response).await?;
        let prices: HashMap<String, HashMap<String, f64>> = response.json().await?;
        prices
            .get(coin_id)
            .and_then(|quotes| quotes.get(&self.vs_currency))
            .copied()
            .ok_or_else(|| GatewayError::MissingPrice(coin_id.to_string()))
    }
}
