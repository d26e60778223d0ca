use serde::{Deserialize, Serialize};

/// Top-level configuration for coinplan. All sections and fields are
/// optional in the TOML file and fall back to the defaults below.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CoinplanConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Configuration for the HTTP surface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    /// Socket address the server binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Directory served at `/` for static assets.
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            static_dir: default_static_dir(),
        }
    }
}

/// Configuration for the upstream market-data gateway.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GatewayConfig {
    /// Base URL of the provider API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Quote currency for OHLC and spot-price requests.
    #[serde(default = "default_vs_currency")]
    pub vs_currency: String,
    /// Human-readable provider name, used in error messages.
    #[serde(default = "default_provider_name")]
    pub provider_name: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            vs_currency: default_vs_currency(),
            provider_name: default_provider_name(),
        }
    }
}

/// Tunables for the request coordinator and catalog load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    /// OHLC window span in days requested from the provider.
    #[serde(default = "default_ohlc_days")]
    pub ohlc_days: u32,
    /// Fixed delay applied before gateway calls on a cache miss,
    /// as rate-limit courtesy toward the provider.
    #[serde(default = "default_courtesy_delay_ms")]
    pub courtesy_delay_ms: u64,
    /// Fixed interval between catalog load retries.
    #[serde(default = "default_catalog_retry_seconds")]
    pub catalog_retry_seconds: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ohlc_days: default_ohlc_days(),
            courtesy_delay_ms: default_courtesy_delay_ms(),
            catalog_retry_seconds: default_catalog_retry_seconds(),
        }
    }
}

/// Configuration for the analysis cache.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CacheConfig {
    /// How long a cached plan stays fresh, in seconds.
    #[serde(default = "default_cache_ttl_seconds")]
    pub ttl_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_cache_ttl_seconds(),
        }
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0:3000".to_string()
}
fn default_static_dir() -> String {
    "public".to_string()
}
fn default_base_url() -> String {
    "https://api.coingecko.com/api/v3".to_string()
}
fn default_vs_currency() -> String {
    "usd".to_string()
}
fn default_provider_name() -> String {
    "CoinGecko".to_string()
}
fn default_ohlc_days() -> u32 {
    30
}
fn default_courtesy_delay_ms() -> u64 {
    1000
}
fn default_catalog_retry_seconds() -> u64 {
    5
}
fn default_cache_ttl_seconds() -> u64 {
    300
}
