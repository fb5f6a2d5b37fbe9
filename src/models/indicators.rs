use serde::{Deserialize, Serialize};

use super::price::WeeklySeries;

/// Daily indicators computed per refresh. Never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub rsi: Option<f64>,
    pub ma_short: Option<f64>,
    pub ma_long: Option<f64>,
}

/// Buy/sell conditions for one refresh
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeSignal {
    pub buy: bool,
    pub sell: bool,
}

/// Full result of one computation cycle: the updated weekly series plus
/// every indicator derived from the daily and weekly closes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub weekly_series: WeeklySeries,
    pub rsi: Option<f64>,
    /// 50-day simple moving average
    pub ma_short: Option<f64>,
    /// 200-day simple moving average
    pub ma_long: Option<f64>,
    pub ma_50w: Option<f64>,
    pub ma_200w: Option<f64>,
    pub buy_signal: bool,
    pub sell_signal: bool,
}

impl Snapshot {
    pub fn indicators(&self) -> IndicatorSnapshot {
        IndicatorSnapshot {
            rsi: self.rsi,
            ma_short: self.ma_short,
            ma_long: self.ma_long,
        }
    }

    pub fn signal(&self) -> TradeSignal {
        TradeSignal {
            buy: self.buy_signal,
            sell: self.sell_signal,
        }
    }
}
