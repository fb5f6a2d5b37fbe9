//! Buy/sell condition evaluation from sentiment and daily RSI

use tracing::info;

use super::thresholds::SignalThresholds;
use crate::models::TradeSignal;

/// Evaluate the signal with the default thresholds.
///
/// Buy when fear & greed < 20 and RSI < 30, sell when fear & greed > 80 and
/// RSI > 70. An unavailable RSI never triggers either side.
pub fn evaluate_signal(fear_greed: u8, rsi: Option<f64>) -> TradeSignal {
    evaluate_signal_with(&SignalThresholds::default(), fear_greed, rsi)
}

pub fn evaluate_signal_with(
    thresholds: &SignalThresholds,
    fear_greed: u8,
    rsi: Option<f64>,
) -> TradeSignal {
    let Some(rsi) = rsi else {
        return TradeSignal::default();
    };

    let signal = TradeSignal {
        buy: fear_greed < thresholds.buy_fear_below && rsi < thresholds.buy_rsi_below,
        sell: fear_greed > thresholds.sell_greed_above && rsi > thresholds.sell_rsi_above,
    };

    if signal.buy {
        info!(fear_greed = fear_greed, rsi = rsi, "BUY SIGNAL TRIGGERED");
    }
    if signal.sell {
        info!(fear_greed = fear_greed, rsi = rsi, "SELL SIGNAL TRIGGERED");
    }

    signal
}
