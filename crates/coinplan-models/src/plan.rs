use serde::{Deserialize, Serialize};

/// The finished trade plan returned to callers and stored in the cache.
///
/// Price fields are decimal strings with two fractional digits. Rounding
/// happens here, at construction, never inside the analysis arithmetic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalysisResult {
    pub current_price: String,
    pub entry: String,
    pub exit: String,
    pub stop_loss: String,
    pub take_profit_1: String,
    pub take_profit_2: String,
    pub atr: String,
    pub narrative: String,
}

/// Format a price level with two fractional digits.
pub fn format_price(value: f64) -> String {
    format!("{value:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_price_two_digits() {
        assert_eq!(format_price(1234.5), "1234.50");
        assert_eq!(format_price(0.0), "0.00");
        assert_eq!(format_price(6.5), "6.50");
    }

    #[test]
    fn format_price_truncates_excess_precision() {
        assert_eq!(format_price(0.119), "0.12");
    }

    #[test]
    fn roundtrip_analysis_result() {
        let result = AnalysisResult {
            current_price: "42000.00".to_string(),
            entry: "40000.00".to_string(),
            exit: "45000.00".to_string(),
            stop_loss: "39200.00".to_string(),
            take_profit_1: "45000.00".to_string(),
            take_profit_2: "45800.00".to_string(),
            atr: "800.00".to_string(),
            narrative: "Bitcoin is currently priced at $42000.00".to_string(),
        };
        let json = serde_json::to_string(&result).unwrap();
        let parsed: AnalysisResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, parsed);
    }
}
