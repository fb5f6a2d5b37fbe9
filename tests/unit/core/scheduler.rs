//! Unit tests for the refresh scheduler's cron conversion

use btc_tracker::core::scheduler::cron_expression;
use cron::Schedule;
use std::str::FromStr;

#[test]
fn test_sub_minute_intervals_use_seconds_field() {
    assert_eq!(cron_expression(30).unwrap(), "*/30 * * * * *");
    assert_eq!(cron_expression(1).unwrap(), "*/1 * * * * *");
}

#[test]
fn test_minute_intervals_use_minutes_field() {
    assert_eq!(cron_expression(60).unwrap(), "0 */1 * * * *");
    assert_eq!(cron_expression(900).unwrap(), "0 */15 * * * *");
}

#[test]
fn test_hour_intervals_use_hours_field() {
    assert_eq!(cron_expression(3600).unwrap(), "0 0 */1 * * *");
    assert_eq!(cron_expression(6 * 3600).unwrap(), "0 0 */6 * * *");
}

#[test]
fn test_one_day_fires_once_at_midnight() {
    assert_eq!(cron_expression(86_400).unwrap(), "0 0 0 * * *");
}

#[test]
fn test_intervals_that_would_drift_are_rejected() {
    // 90s would fire every minute, 7h would fire at 0,7,14,21 then 0 again
    for interval in [0, 7, 59, 90, 3599, 5400, 7 * 3600, 86_401, 2 * 86_400] {
        assert!(
            cron_expression(interval).is_err(),
            "{interval}s should not be accepted"
        );
    }
}

#[test]
fn test_generated_expressions_parse() {
    for interval in [1, 15, 30, 60, 300, 1800, 3600, 4 * 3600, 12 * 3600, 86_400] {
        let expr = cron_expression(interval).unwrap();
        assert!(
            Schedule::from_str(&expr).is_ok(),
            "expression '{expr}' for {interval}s should parse"
        );
    }
}
