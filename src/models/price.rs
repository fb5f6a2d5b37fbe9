//! Price series data models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single dated price. Daily points carry the close of that day, weekly
/// points the mean close of the week they start.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, price: f64) -> Self {
        Self { date, price }
    }
}

/// Chronological daily closes, one point per day at most. Gaps are allowed.
pub type DailySeries = Vec<PricePoint>;

/// Chronological weekly means, one point per calendar week.
pub type WeeklySeries = Vec<PricePoint>;

/// Extract the price column of a series
pub fn closing_prices(series: &[PricePoint]) -> Vec<f64> {
    series.iter().map(|p| p.price).collect()
}

/// Round to 2 decimal places, halves away from zero
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
