//! Deterministic plain-language explanation of a trade plan.
//!
//! Pure function of the coin name, spot price and derived levels.
//! Identical inputs always produce identical text.

use coinplan_models::format_price;

use crate::analyzer::PlanLevels;

/// Price position relative to the window extremes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Zone {
    NearSupport,
    NearResistance,
    Consolidating,
}

/// Volatility classification from the ATR.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Volatility {
    None,
    Low,
    High,
}

fn classify_zone(current_price: f64, levels: &PlanLevels) -> Zone {
    let pct_above_support = (current_price - levels.support) / levels.support * 100.0;
    let pct_below_resistance = (levels.resistance - current_price) / levels.resistance * 100.0;
    if pct_above_support < 10.0 {
        Zone::NearSupport
    } else if pct_below_resistance < 10.0 {
        Zone::NearResistance
    } else {
        Zone::Consolidating
    }
}

fn classify_volatility(current_price: f64, atr: f64) -> Volatility {
    if atr == 0.0 {
        Volatility::None
    } else if atr < current_price * 0.02 {
        Volatility::Low
    } else {
        Volatility::High
    }
}

/// Build the narrative for one analyzed coin.
pub fn narrate(coin_name: &str, current_price: f64, levels: &PlanLevels) -> String {
    let zone = classify_zone(current_price, levels);
    let volatility = classify_volatility(current_price, levels.atr);

    let price = format_price(current_price);
    let support = format_price(levels.support);
    let resistance = format_price(levels.resistance);
    let atr = format_price(levels.atr);
    let entry = format_price(levels.entry);
    let stop_loss = format_price(levels.stop_loss);
    let take_profit_1 = format_price(levels.take_profit_1);
    let take_profit_2 = format_price(levels.take_profit_2);

    let zone_text = match zone {
        Zone::NearSupport => "a potential support zone",
        Zone::NearResistance => "a potential resistance zone",
        Zone::Consolidating => "a consolidation phase",
    };

    let volatility_text = match volatility {
        Volatility::None => "extremely low or no recorded volatility (possible data issue)",
        Volatility::Low => "low volatility",
        Volatility::High => "high volatility",
    };

    let movement_text = match volatility {
        Volatility::None | Volatility::Low => "gradual",
        Volatility::High => "more significant",
    };

    let stop_text = if levels.stop_loss == levels.support {
        "tight, matching the support"
    } else {
        "set below support"
    };

    let gain_pct = (levels.take_profit_1 - levels.entry) / levels.entry * 100.0;

    let closing_text = match volatility {
        Volatility::None | Volatility::Low => "low volatility environment",
        Volatility::High => "volatile conditions",
    };

    let mut narrative = String::new();
    narrative.push_str(&format!(
        "{coin_name} is currently priced at ${price}, which sits between its 30-day support \
         level of ${support} and resistance level of ${resistance}. "
    ));
    narrative.push_str(&format!(
        "This positioning suggests that the price is in {zone_text}, potentially preparing \
         for a move toward either the support or resistance. "
    ));
    narrative.push_str(&format!(
        "The ATR (Average True Range) of ${atr} indicates {volatility_text} over the past \
         14 days, meaning price movements could be {movement_text}. "
    ));
    narrative.push_str(&format!(
        "A suggested entry point near ${entry} aligns with buying at support, offering a \
         low-risk opportunity if the price holds this level. "
    ));
    narrative.push_str(&format!(
        "The stop loss at ${stop_loss} is {stop_text}, meaning any break below could signal \
         a bearish shift, so be cautious there. "
    ));
    narrative.push_str(&format!(
        "The first take profit at ${take_profit_1} targets the recent resistance, implying \
         a potential {gain_pct:.0}% gain from the entry if reached, with a stretch target \
         at ${take_profit_2} beyond it. "
    ));
    narrative.push_str(&format!(
        "Traders might watch for a breakout above ${resistance} with increased volume to \
         confirm further upside, or a drop below ${support} to exit quickly due to the \
         {closing_text}."
    ));
    narrative
}

#[cfg(test)]
mod tests {
    use super::*;

    fn levels(support: f64, resistance: f64, atr: f64) -> PlanLevels {
        PlanLevels {
            support,
            resistance,
            atr,
            entry: support,
            exit: resistance,
            stop_loss: support - atr,
            take_profit_1: resistance,
            take_profit_2: resistance + atr,
        }
    }

    #[test]
    fn identical_inputs_identical_text() {
        let l = levels(100.0, 150.0, 3.0);
        assert_eq!(narrate("Bitcoin", 120.0, &l), narrate("Bitcoin", 120.0, &l));
    }

    #[test]
    fn near_support_classification() {
        // 105 is 5% above support 100.
        let text = narrate("Bitcoin", 105.0, &levels(100.0, 150.0, 3.0));
        assert!(text.contains("a potential support zone"));
    }

    #[test]
    fn near_resistance_classification() {
        // 145 is ~3.3% below resistance 150 and 45% above support.
        let text = narrate("Bitcoin", 145.0, &levels(100.0, 150.0, 3.0));
        assert!(text.contains("a potential resistance zone"));
    }

    #[test]
    fn consolidating_classification() {
        let text = narrate("Bitcoin", 125.0, &levels(100.0, 150.0, 3.0));
        assert!(text.contains("a consolidation phase"));
    }

    #[test]
    fn zero_atr_reads_as_data_issue() {
        let text = narrate("Bitcoin", 125.0, &levels(100.0, 150.0, 0.0));
        assert!(text.contains("possible data issue"));
        assert!(text.contains("low volatility environment"));
    }

    #[test]
    fn low_volatility_below_two_percent_of_price() {
        // ATR 2 on a 125 price is 1.6%.
        let text = narrate("Bitcoin", 125.0, &levels(100.0, 150.0, 2.0));
        assert!(text.contains("indicates low volatility"));
        assert!(text.contains("gradual"));
    }

    #[test]
    fn high_volatility_at_or_above_two_percent() {
        // ATR 5 on a 125 price is 4%.
        let text = narrate("Bitcoin", 125.0, &levels(100.0, 150.0, 5.0));
        assert!(text.contains("indicates high volatility"));
        assert!(text.contains("more significant"));
        assert!(text.contains("volatile conditions"));
    }

    #[test]
    fn take_profit_gain_is_whole_percent() {
        // Entry 100 to TP1 150 is a 50% gain.
        let text = narrate("Bitcoin", 125.0, &levels(100.0, 150.0, 3.0));
        assert!(text.contains("a potential 50% gain"));
    }

    #[test]
    fn zero_atr_stop_matches_support() {
        let text = narrate("Bitcoin", 125.0, &levels(100.0, 150.0, 0.0));
        assert!(text.contains("tight, matching the support"));
    }

    #[test]
    fn prices_are_formatted_with_two_digits() {
        let text = narrate("Bitcoin", 124.5, &levels(100.0, 150.0, 3.0));
        assert!(text.contains("$124.50"));
        assert!(text.contains("$100.00"));
        assert!(text.contains("$153.00"));
    }
}
