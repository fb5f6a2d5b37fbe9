//! RSI (Relative Strength Index) indicator, Wilder smoothing

/// Default RSI lookback
pub const DEFAULT_RSI_PERIOD: usize = 14;

/// Calculate the most recent Wilder RSI over `values`.
///
/// RSI = 100 - (100 / (1 + RS)), RS = average gain / average loss
///
/// The averages are seeded with the simple mean of the first `period`
/// differences, then every later difference is folded in with
/// `avg = (avg * (period - 1) + current) / period`.
///
/// Returns `None` when fewer than `period + 1` values are available, when
/// `period` is 0, or when the inputs are not finite. A zero average loss
/// yields 100, or 50 when the average gain is zero as well (flat series).
pub fn calculate_rsi(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period + 1 {
        return None;
    }

    let mut gain_sum = 0.0;
    let mut loss_sum = 0.0;
    for window in values[..=period].windows(2) {
        let (gain, loss) = split_change(window[1] - window[0]);
        gain_sum += gain;
        loss_sum += loss;
    }

    let n = period as f64;
    let mut avg_gain = gain_sum / n;
    let mut avg_loss = loss_sum / n;

    for window in values[period..].windows(2) {
        let (gain, loss) = split_change(window[1] - window[0]);
        avg_gain = (avg_gain * (n - 1.0) + gain) / n;
        avg_loss = (avg_loss * (n - 1.0) + loss) / n;
    }

    let rsi = rsi_from_averages(avg_gain, avg_loss);
    rsi.is_finite().then_some(rsi)
}

/// Calculate RSI with the default period (14)
pub fn calculate_rsi_default(values: &[f64]) -> Option<f64> {
    calculate_rsi(values, DEFAULT_RSI_PERIOD)
}

fn split_change(change: f64) -> (f64, f64) {
    if change > 0.0 {
        (change, 0.0)
    } else {
        (0.0, change.abs())
    }
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        if avg_gain == 0.0 {
            return 50.0;
        }
        return 100.0;
    }

    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}
