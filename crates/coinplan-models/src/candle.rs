use serde::{Deserialize, Serialize};

/// One OHLC period from the market-data provider.
///
/// Windows are chronological, oldest first. Analysis only consumes
/// `high`, `low` and `close`; `open` is carried for completeness.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Candle {
    /// Period timestamp in epoch milliseconds.
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Candle {
    /// Build a candle from a provider row of the form `[ts, o, h, l, c]`.
    pub fn from_row(row: [f64; 5]) -> Self {
        Self {
            timestamp: row[0] as i64,
            open: row[1],
            high: row[2],
            low: row[3],
            close: row[4],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_row_maps_fields_in_order() {
        let candle = Candle::from_row([1_700_000_000_000.0, 10.0, 12.0, 9.0, 11.0]);
        assert_eq!(candle.timestamp, 1_700_000_000_000);
        assert_eq!(candle.open, 10.0);
        assert_eq!(candle.high, 12.0);
        assert_eq!(candle.low, 9.0);
        assert_eq!(candle.close, 11.0);
    }

    #[test]
    fn roundtrip_candle() {
        let candle = Candle::from_row([1_700_000_000_000.0, 10.0, 12.0, 9.0, 11.0]);
        let json = serde_json::to_string(&candle).unwrap();
        let parsed: Candle = serde_json::from_str(&json).unwrap();
        assert_eq!(candle, parsed);
    }
}
