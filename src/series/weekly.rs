//! Daily to weekly aggregation (Monday-aligned calendar weeks)

use chrono::{Datelike, Duration, NaiveDate};
use tracing::debug;

use crate::models::{round2, PricePoint, WeeklySeries};

/// Monday of the ISO week containing `date`. Sunday belongs to the week that
/// started six days earlier.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let days_from_monday = date.weekday().num_days_from_monday();
    date - Duration::days(i64::from(days_from_monday))
}

/// Group consecutive daily points by calendar week and average each bucket.
///
/// Each bucket is labelled with the date of its first observed point, not the
/// Monday itself, and priced with the mean close rounded to 2 decimals.
/// Weeks without any points are not emitted. The input must be ascending
/// with unique dates; it is neither sorted nor deduplicated here.
pub fn aggregate_to_weekly(daily: &[PricePoint]) -> WeeklySeries {
    let mut weekly = Vec::new();
    let mut bucket: Option<WeekBucket> = None;

    for point in daily {
        let key = week_start(point.date);
        match bucket.as_mut() {
            Some(current) if current.key == key => current.push(point.price),
            _ => {
                if let Some(done) = bucket.take() {
                    weekly.push(done.finish());
                }
                bucket = Some(WeekBucket::open(key, point));
            }
        }
    }

    if let Some(done) = bucket {
        weekly.push(done.finish());
    }

    debug!(
        daily_points = daily.len(),
        weeks = weekly.len(),
        "Aggregated {} daily points into {} weeks",
        daily.len(),
        weekly.len()
    );
    weekly
}

struct WeekBucket {
    key: NaiveDate,
    first_date: NaiveDate,
    sum: f64,
    count: usize,
}

impl WeekBucket {
    fn open(key: NaiveDate, point: &PricePoint) -> Self {
        Self {
            key,
            first_date: point.date,
            sum: point.price,
            count: 1,
        }
    }

    fn push(&mut self, price: f64) {
        self.sum += price;
        self.count += 1;
    }

    fn finish(self) -> PricePoint {
        PricePoint::new(self.first_date, round2(self.sum / self.count as f64))
    }
}
