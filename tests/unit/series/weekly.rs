//! Unit tests for daily to weekly aggregation

use btc_tracker::models::PricePoint;
use btc_tracker::series::{aggregate_to_weekly, week_start};

use crate::fixtures::{daily_range, daily_series, date};

#[test]
fn test_week_start_is_monday() {
    // 2024-01-01 is a Monday
    for day in 1..=7 {
        assert_eq!(week_start(date(2024, 1, day)), date(2024, 1, 1));
    }
    assert_eq!(week_start(date(2024, 1, 8)), date(2024, 1, 8));
}

#[test]
fn test_week_start_crosses_year_boundary() {
    // 2025-01-01 is a Wednesday
    assert_eq!(week_start(date(2025, 1, 1)), date(2024, 12, 30));
}

#[test]
fn test_full_weeks_average_their_closes() {
    let daily = daily_series(date(2024, 1, 1), 21, 100.0);
    let weekly = aggregate_to_weekly(&daily);
    assert_eq!(
        weekly,
        vec![
            PricePoint::new(date(2024, 1, 1), 103.0),
            PricePoint::new(date(2024, 1, 8), 110.0),
            PricePoint::new(date(2024, 1, 15), 117.0),
        ]
    );
}

#[test]
fn test_partial_first_week_uses_first_observed_date() {
    // Wednesday through the following Tuesday
    let daily = daily_range(date(2024, 1, 3), date(2024, 1, 9), 0.0);
    let weekly = aggregate_to_weekly(&daily);
    assert_eq!(weekly.len(), 2);
    assert_eq!(weekly[0], PricePoint::new(date(2024, 1, 3), 2.0));
    assert_eq!(weekly[1], PricePoint::new(date(2024, 1, 8), 5.5));
}

#[test]
fn test_sunday_closes_its_week() {
    let daily = vec![
        PricePoint::new(date(2024, 1, 6), 10.0),
        PricePoint::new(date(2024, 1, 7), 20.0),
        PricePoint::new(date(2024, 1, 8), 30.0),
    ];
    let weekly = aggregate_to_weekly(&daily);
    assert_eq!(
        weekly,
        vec![
            PricePoint::new(date(2024, 1, 6), 15.0),
            PricePoint::new(date(2024, 1, 8), 30.0),
        ]
    );
}

#[test]
fn test_sparse_input_produces_sparse_output() {
    let daily = vec![
        PricePoint::new(date(2024, 1, 2), 10.0),
        PricePoint::new(date(2024, 1, 16), 20.0),
    ];
    let weekly = aggregate_to_weekly(&daily);
    assert_eq!(weekly.len(), 2);
    assert_eq!(weekly[0].date, date(2024, 1, 2));
    assert_eq!(weekly[1].date, date(2024, 1, 16));
}

#[test]
fn test_mean_is_rounded_to_cents() {
    let daily = vec![
        PricePoint::new(date(2024, 1, 1), 1.111),
        PricePoint::new(date(2024, 1, 2), 1.113),
    ];
    assert_eq!(aggregate_to_weekly(&daily)[0].price, 1.11);

    let daily = vec![
        PricePoint::new(date(2024, 1, 1), 10.0),
        PricePoint::new(date(2024, 1, 2), 10.0),
        PricePoint::new(date(2024, 1, 3), 10.01),
    ];
    assert_eq!(aggregate_to_weekly(&daily)[0].price, 10.0);
}

#[test]
fn test_empty_input_yields_empty_series() {
    assert!(aggregate_to_weekly(&[]).is_empty());
}

#[test]
fn test_aggregation_is_deterministic() {
    let daily = daily_series(date(2023, 11, 15), 120, 30_000.0);
    let first = aggregate_to_weekly(&daily);
    let second = aggregate_to_weekly(&daily);
    assert_eq!(first, second);
}

#[test]
fn test_weeks_are_strictly_ascending_and_unique() {
    let daily = daily_series(date(2023, 6, 14), 400, 1.0);
    let weekly = aggregate_to_weekly(&daily);
    for pair in weekly.windows(2) {
        assert!(week_start(pair[0].date) < week_start(pair[1].date));
    }
}
