//! Pure technical analysis over an OHLC window.
//!
//! Support and resistance come from the whole supplied window, not a
//! rolling sub-window. All arithmetic stays at full f64 precision;
//! rounding belongs to the output boundary.

use coinplan_models::Candle;

use crate::error::EngineError;

/// Minimum window size for a meaningful plan.
pub const MIN_CANDLES: usize = 5;

/// Number of most recent true ranges averaged into the ATR.
pub const ATR_PERIOD: usize = 14;

/// Full-precision levels derived from one OHLC window plus spot price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanLevels {
    pub support: f64,
    pub resistance: f64,
    pub atr: f64,
    pub entry: f64,
    pub exit: f64,
    pub stop_loss: f64,
    pub take_profit_1: f64,
    pub take_profit_2: f64,
}

/// Derive trade-plan levels from a chronological OHLC window.
pub fn analyze(candles: &[Candle]) -> Result<PlanLevels, EngineError> {
    if candles.len() < MIN_CANDLES {
        return Err(EngineError::InsufficientData {
            required: MIN_CANDLES,
            provided: candles.len(),
        });
    }

    let support = candles.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);
    let resistance = candles
        .iter()
        .map(|c| c.high)
        .fold(f64::NEG_INFINITY, f64::max);

    let atr = average_true_range(candles);

    Ok(PlanLevels {
        support,
        resistance,
        atr,
        entry: support,
        exit: resistance,
        stop_loss: support - atr,
        take_profit_1: resistance,
        take_profit_2: resistance + atr,
    })
}

/// True range at each step i >= 1:
/// max(high - low, |high - prev_close|, |low - prev_close|).
fn true_ranges(candles: &[Candle]) -> Vec<f64> {
    candles
        .windows(2)
        .map(|pair| {
            let prev_close = pair[0].close;
            let c = pair[1];
            (c.high - c.low)
                .max((c.high - prev_close).abs())
                .max((c.low - prev_close).abs())
        })
        .collect()
}

/// Arithmetic mean of the last `min(ATR_PERIOD, available)` true ranges.
/// Zero when the window yields no true ranges at all.
fn average_true_range(candles: &[Candle]) -> f64 {
    let ranges = true_ranges(candles);
    if ranges.is_empty() {
        return 0.0;
    }
    let tail = &ranges[ranges.len().saturating_sub(ATR_PERIOD)..];
    tail.iter().sum::<f64>() / tail.len() as f64
}
