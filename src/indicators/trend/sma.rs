//! SMA (Simple Moving Average) indicator

/// Mean of the trailing `period` values.
///
/// Only the last `period` elements contribute, so calling this on a growing
/// prefix of a series yields the usual sliding-window average. Returns `None`
/// when the series is shorter than `period` or `period` is 0.
pub fn calculate_sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }

    let window = &values[values.len() - period..];
    Some(window.iter().sum::<f64>() / period as f64)
}
