use serde::{Deserialize, Serialize};

/// A single entry in the provider's coin catalog.
///
/// Identity is the canonical `id` (e.g. "bitcoin"); `name` and `symbol`
/// are what users type. Records are immutable once the catalog is loaded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CoinRecord {
    pub id: String,
    pub name: String,
    pub symbol: String,
}

impl CoinRecord {
    /// Case-insensitive match against name or symbol.
    /// `token` must already be lowercased by the caller.
    pub fn matches(&self, token: &str) -> bool {
        self.name.to_lowercase() == token || self.symbol.to_lowercase() == token
    }
}
