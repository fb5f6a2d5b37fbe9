//! Indicator snapshot for one refresh cycle

use crate::indicators::{calculate_rsi, calculate_sma};
use crate::models::{closing_prices, PricePoint, Snapshot};
use crate::series::{merge_weekly, MergeOutcome, MergePolicy};
use crate::signals::evaluate_signal;

pub const RSI_PERIOD: usize = 14;
pub const DAILY_MA_SHORT: usize = 50;
pub const DAILY_MA_LONG: usize = 200;
pub const WEEKLY_MA_SHORT: usize = 50;
pub const WEEKLY_MA_LONG: usize = 200;

/// Merge `daily` into a copy of `persisted` and derive every indicator.
///
/// RSI(14) and the 50/200 day averages come from the daily closes, the
/// 50/200 week averages from the merged weekly series. No I/O happens here;
/// the returned outcome tells the caller whether the weekly series changed
/// and has to be saved.
pub fn compute_snapshot(
    daily: &[PricePoint],
    persisted: &[PricePoint],
    fear_greed: u8,
    policy: MergePolicy,
) -> (Snapshot, MergeOutcome) {
    let mut weekly_series = persisted.to_vec();
    let outcome = merge_weekly(&mut weekly_series, daily, policy);

    let daily_closes = closing_prices(daily);
    let weekly_closes = closing_prices(&weekly_series);

    let rsi = calculate_rsi(&daily_closes, RSI_PERIOD);
    let signal = evaluate_signal(fear_greed, rsi);

    let snapshot = Snapshot {
        rsi,
        ma_short: calculate_sma(&daily_closes, DAILY_MA_SHORT),
        ma_long: calculate_sma(&daily_closes, DAILY_MA_LONG),
        ma_50w: calculate_sma(&weekly_closes, WEEKLY_MA_SHORT),
        ma_200w: calculate_sma(&weekly_closes, WEEKLY_MA_LONG),
        buy_signal: signal.buy,
        sell_signal: signal.sell,
        weekly_series,
    };

    (snapshot, outcome)
}
