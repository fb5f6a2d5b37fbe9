//! Threshold definitions for the sentiment/RSI signal

use serde::{Deserialize, Serialize};

/// Gates for the buy and sell conditions. Comparisons are strict.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalThresholds {
    /// Buy requires fear & greed below this value
    pub buy_fear_below: u8,
    /// Buy requires RSI below this value
    pub buy_rsi_below: f64,
    /// Sell requires fear & greed above this value
    pub sell_greed_above: u8,
    /// Sell requires RSI above this value
    pub sell_rsi_above: f64,
}

impl SignalThresholds {
    pub const BUY_FEAR_BELOW: u8 = 20;
    pub const BUY_RSI_BELOW: f64 = 30.0;
    pub const SELL_GREED_ABOVE: u8 = 80;
    pub const SELL_RSI_ABOVE: f64 = 70.0;

    /// True when no input pair can satisfy both conditions at once
    pub fn is_exclusive(&self) -> bool {
        self.buy_fear_below <= self.sell_greed_above.saturating_add(1)
            || self.buy_rsi_below <= self.sell_rsi_above
    }
}

impl Default for SignalThresholds {
    fn default() -> Self {
        Self {
            buy_fear_below: Self::BUY_FEAR_BELOW,
            buy_rsi_below: Self::BUY_RSI_BELOW,
            sell_greed_above: Self::SELL_GREED_ABOVE,
            sell_rsi_above: Self::SELL_RSI_ABOVE,
        }
    }
}
