use coinplan_gateway::GatewayError;
use thiserror::Error;

/// Terminal outcomes of a request flow, other than success.
///
/// Catalog unavailability never appears here: while the catalog is still
/// loading, unresolvable tokens surface as `CoinNotFound`.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Cryptocurrency not found")]
    CoinNotFound,

    #[error("Not enough data for analysis")]
    InsufficientData { required: usize, provided: usize },

    #[error("Error fetching data from {provider}")]
    Gateway {
        provider: String,
        #[source]
        source: GatewayError,
    },
}
