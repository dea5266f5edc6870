//! Trading signal generation and risk tiering from a scored snapshot.

use crate::reported;
use vector_core::{RiskLevel, SignalConfidence, TradeAction, TradingSignal};

/// Assumed annualized volatility when the feed reports none
const DEFAULT_VOLATILITY: f64 = 0.25;

/// Derive entry/stop/target levels and position sizing.
///
/// Support and resistance are volatility-scaled bands around the current
/// price; the stop is capped at 8% below entry and the target at twice the
/// stop distance.
pub fn generate_trading_signals(
    price: f64,
    volatility: Option<f64>,
    total_score: f64,
) -> TradingSignal {
    let volatility = reported(volatility).unwrap_or(DEFAULT_VOLATILITY);

    let support = price * (1.0 - volatility * 0.3);
    let resistance = price * (1.0 + volatility * 0.4);

    let stop_distance = price - support;
    let target_distance = stop_distance * 2.0;

    let signal = if total_score >= 75.0 {
        TradeAction::Buy
    } else if total_score <= 40.0 {
        TradeAction::Sell
    } else {
        TradeAction::Hold
    };

    let confidence = if total_score >= 80.0 {
        SignalConfidence::High
    } else if total_score >= 60.0 {
        SignalConfidence::Medium
    } else {
        SignalConfidence::Low
    };

    TradingSignal {
        signal,
        entry: price,
        stop_loss: support.max(price * 0.92),
        target: resistance.min(price + target_distance),
        risk_reward: "2:1".to_string(),
        position_size: (((100.0 - total_score) / 10.0).floor() as i64).clamp(1, 5) as u32,
        confidence,
    }
}

/// Risk tier from volatility and total score, first match wins
pub fn determine_risk_level(volatility: Option<f64>, total_score: f64) -> RiskLevel {
    let volatility = reported(volatility).unwrap_or(DEFAULT_VOLATILITY);

    if volatility > 0.4 || total_score < 50.0 {
        RiskLevel::High
    } else if volatility > 0.25 || total_score < 70.0 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worked_example_price_100_vol_025_score_80() {
        let signal = generate_trading_signals(100.0, Some(0.25), 80.0);

        // support = 100*(1 - 0.075) = 92.5, resistance = 100*1.1 = 110
        assert_eq!(signal.signal, TradeAction::Buy);
        assert_eq!(signal.entry, 100.0);
        assert!((signal.stop_loss - 92.5).abs() < 1e-9);
        assert!((signal.target - 110.0).abs() < 1e-9);
        assert_eq!(signal.risk_reward, "2:1");
        assert_eq!(signal.position_size, 2);
        assert_eq!(signal.confidence, SignalConfidence::High);
    }

    #[test]
    fn stop_loss_capped_at_eight_percent() {
        // High volatility pushes support below the 8% floor
        let signal = generate_trading_signals(100.0, Some(0.5), 70.0);
        // support = 85, floor = 92
        assert!((signal.stop_loss - 92.0).abs() < 1e-9);
    }

    #[test]
    fn target_capped_by_resistance() {
        // Low volatility: resistance binds before 2x stop distance
        let signal = generate_trading_signals(100.0, Some(0.1), 70.0);
        // support = 97, target distance = 6, resistance = 104
        assert!((signal.target - 104.0).abs() < 1e-9);
    }

    #[test]
    fn signal_thresholds() {
        assert_eq!(generate_trading_signals(50.0, None, 75.0).signal, TradeAction::Buy);
        assert_eq!(generate_trading_signals(50.0, None, 74.9).signal, TradeAction::Hold);
        assert_eq!(generate_trading_signals(50.0, None, 40.0).signal, TradeAction::Sell);
        assert_eq!(generate_trading_signals(50.0, None, 40.1).signal, TradeAction::Hold);
    }

    #[test]
    fn position_size_clamped_to_1_through_5() {
        assert_eq!(generate_trading_signals(50.0, None, 95.0).position_size, 1);
        assert_eq!(generate_trading_signals(50.0, None, 100.0).position_size, 1);
        assert_eq!(generate_trading_signals(50.0, None, 10.0).position_size, 5);
        assert_eq!(generate_trading_signals(50.0, None, 55.0).position_size, 4);
    }

    #[test]
    fn missing_volatility_defaults() {
        let signal = generate_trading_signals(100.0, None, 80.0);
        assert!((signal.stop_loss - 92.5).abs() < 1e-9);
        // A reported 0 is "not reported", same default
        let zero = generate_trading_signals(100.0, Some(0.0), 80.0);
        assert!((zero.stop_loss - 92.5).abs() < 1e-9);
    }

    #[test]
    fn volatility_branch_outranks_score() {
        // vol > 0.4 fires High before the score is even considered
        assert_eq!(determine_risk_level(Some(0.5), 90.0), RiskLevel::High);
        assert_eq!(determine_risk_level(Some(0.2), 45.0), RiskLevel::High);
        assert_eq!(determine_risk_level(Some(0.3), 90.0), RiskLevel::Medium);
        assert_eq!(determine_risk_level(Some(0.2), 65.0), RiskLevel::Medium);
        assert_eq!(determine_risk_level(Some(0.2), 90.0), RiskLevel::Low);
        // Default 0.25 is not > 0.25: score decides
        assert_eq!(determine_risk_level(None, 90.0), RiskLevel::Low);
    }
}
