//! Shared series builders for unit tests

use btc_tracker::models::PricePoint;
use chrono::{Duration, NaiveDate};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// `count` consecutive days from `start`, priced `base + i`
pub fn daily_series(start: NaiveDate, count: usize, base: f64) -> Vec<PricePoint> {
    (0..count)
        .map(|i| PricePoint::new(start + Duration::days(i as i64), base + i as f64))
        .collect()
}

/// Days from `start` to `end` inclusive, priced `base + days since start`
pub fn daily_range(start: NaiveDate, end: NaiveDate, base: f64) -> Vec<PricePoint> {
    let count = (end - start).num_days() as usize + 1;
    daily_series(start, count, base)
}
