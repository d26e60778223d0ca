pub mod candle;
pub mod coin;
pub mod config;
pub mod plan;

pub use candle::Candle;
pub use coin::CoinRecord;
pub use config::{
    CacheConfig, CoinplanConfig, EngineConfig, GatewayConfig, ServerConfig,
};
pub use plan::{format_price, AnalysisResult};
