//! Unit tests for the fear & greed / RSI signal

use btc_tracker::models::TradeSignal;
use btc_tracker::signals::{evaluate_signal, evaluate_signal_with, SignalThresholds};

const NONE: TradeSignal = TradeSignal {
    buy: false,
    sell: false,
};

#[test]
fn test_buy_on_extreme_fear_and_oversold() {
    assert_eq!(
        evaluate_signal(15, Some(25.0)),
        TradeSignal {
            buy: true,
            sell: false
        }
    );
}

#[test]
fn test_sell_on_extreme_greed_and_overbought() {
    assert_eq!(
        evaluate_signal(85, Some(75.0)),
        TradeSignal {
            buy: false,
            sell: true
        }
    );
}

#[test]
fn test_neutral_inputs_trigger_nothing() {
    assert_eq!(evaluate_signal(50, Some(50.0)), NONE);
}

#[test]
fn test_unavailable_rsi_never_triggers() {
    assert_eq!(evaluate_signal(10, None), NONE);
    assert_eq!(evaluate_signal(95, None), NONE);
}

#[test]
fn test_thresholds_are_strict() {
    assert_eq!(evaluate_signal(20, Some(10.0)), NONE);
    assert_eq!(evaluate_signal(10, Some(30.0)), NONE);
    assert_eq!(evaluate_signal(80, Some(90.0)), NONE);
    assert_eq!(evaluate_signal(90, Some(70.0)), NONE);
}

#[test]
fn test_both_conditions_are_required() {
    assert_eq!(evaluate_signal(10, Some(50.0)), NONE);
    assert_eq!(evaluate_signal(50, Some(10.0)), NONE);
    assert_eq!(evaluate_signal(90, Some(50.0)), NONE);
    assert_eq!(evaluate_signal(50, Some(90.0)), NONE);
}

#[test]
fn test_default_thresholds_are_mutually_exclusive() {
    let thresholds = SignalThresholds::default();
    assert!(thresholds.is_exclusive());

    for fear_greed in 0..=100u8 {
        for rsi in 0..=100 {
            let signal = evaluate_signal(fear_greed, Some(f64::from(rsi)));
            assert!(!(signal.buy && signal.sell));
        }
    }
}

#[test]
fn test_overlapping_custom_thresholds_can_fire_both() {
    let thresholds = SignalThresholds {
        buy_fear_below: 60,
        buy_rsi_below: 60.0,
        sell_greed_above: 40,
        sell_rsi_above: 40.0,
    };
    assert!(!thresholds.is_exclusive());
    assert_eq!(
        evaluate_signal_with(&thresholds, 50, Some(50.0)),
        TradeSignal {
            buy: true,
            sell: true
        }
    );
}
