//! Unit tests for SMA indicator

use btc_tracker::indicators::trend::calculate_sma;

#[test]
fn test_sma_of_last_five() {
    let values: Vec<f64> = (100..110).map(f64::from).collect();
    assert_eq!(calculate_sma(&values, 5), Some(107.0));
}

#[test]
fn test_sma_insufficient_data() {
    let values = vec![1.0, 2.0, 3.0];
    for period in 4..10 {
        assert!(calculate_sma(&values, period).is_none());
    }
    assert!(calculate_sma(&[], 1).is_none());
}

#[test]
fn test_sma_zero_period_is_unavailable() {
    assert!(calculate_sma(&[1.0, 2.0], 0).is_none());
}

#[test]
fn test_sma_period_equal_to_length_uses_whole_series() {
    assert_eq!(calculate_sma(&[2.0, 4.0, 6.0], 3), Some(4.0));
}

#[test]
fn test_sma_sliding_window_uses_trailing_values_only() {
    let values = vec![10.0, 20.0, 30.0, 40.0, 50.0];
    let rolling: Vec<Option<f64>> = (1..=values.len())
        .map(|end| calculate_sma(&values[..end], 2))
        .collect();
    assert_eq!(
        rolling,
        vec![None, Some(15.0), Some(25.0), Some(35.0), Some(45.0)]
    );
}

#[test]
fn test_sma_does_not_mutate_input() {
    let values = vec![3.0, 1.0, 2.0];
    let copy = values.clone();
    let _ = calculate_sma(&values, 2);
    assert_eq!(values, copy);
}
