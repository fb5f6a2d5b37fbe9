//! Reconciling the persisted weekly series with freshly aggregated weeks

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{debug, info, warn};

use super::weekly::{aggregate_to_weekly, week_start};
use crate::models::{PricePoint, WeeklySeries};

/// How the in-progress (latest) week is treated on merge
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergePolicy {
    /// When a new week boundary has been crossed, only the candidate's latest
    /// week is appended. A persisted partial week keeps the value it had when
    /// first appended.
    #[default]
    AppendNewWeeks,
    /// Like `AppendNewWeeks`, but the last persisted week is overwritten with
    /// the freshly computed bucket while it is still the current week.
    ReplaceInProgress,
    /// Like `AppendNewWeeks`, but every candidate week newer than the last
    /// persisted one is appended, so missed refreshes leave no gaps.
    FillMissedWeeks,
}

impl FromStr for MergePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "append" | "append_new_weeks" => Ok(Self::AppendNewWeeks),
            "replace" | "replace_in_progress" => Ok(Self::ReplaceInProgress),
            "fill" | "fill_missed_weeks" => Ok(Self::FillMissedWeeks),
            other => Err(format!("Unknown weekly merge policy '{}'", other)),
        }
    }
}

/// What a merge did to the persisted series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Persisted series was empty and now holds every candidate week
    Initialized(usize),
    /// Number of new weeks appended
    Appended(usize),
    /// Last week was overwritten in place (`ReplaceInProgress` only)
    Replaced,
    Unchanged,
    /// The fresh data ends before the last persisted week
    Stale,
}

impl MergeOutcome {
    /// Whether the series must be written back
    pub fn is_changed(&self) -> bool {
        match self {
            Self::Initialized(n) | Self::Appended(n) => *n > 0,
            Self::Replaced => true,
            Self::Unchanged | Self::Stale => false,
        }
    }
}

/// Merge the weeks aggregated from `fresh_daily` into `persisted`.
///
/// An empty series is replaced by the whole candidate. Otherwise the last
/// persisted week and the candidate's latest week are compared by their
/// Monday-aligned key: a newer candidate week is appended (every newer week
/// under `FillMissedWeeks`), the same week is left untouched (or replaced,
/// under `ReplaceInProgress`), and an older one is ignored. Previously
/// persisted weeks are never removed or reordered.
pub fn merge_weekly(
    persisted: &mut WeeklySeries,
    fresh_daily: &[PricePoint],
    policy: MergePolicy,
) -> MergeOutcome {
    let candidate = aggregate_to_weekly(fresh_daily);

    let Some(last_stored) = persisted.last().copied() else {
        let count = candidate.len();
        *persisted = candidate;
        if count > 0 {
            info!(weeks = count, "Initialized weekly series with {} weeks", count);
        }
        return MergeOutcome::Initialized(count);
    };

    let Some(latest) = candidate.last().copied() else {
        return MergeOutcome::Unchanged;
    };

    let stored_key = week_start(last_stored.date);
    let latest_key = week_start(latest.date);

    if latest_key < stored_key {
        warn!(
            stored = %last_stored.date,
            candidate = %latest.date,
            "Fresh daily data ends before the last persisted week, ignoring"
        );
        return MergeOutcome::Stale;
    }

    if latest_key == stored_key {
        if policy == MergePolicy::ReplaceInProgress && latest != last_stored {
            if let Some(slot) = persisted.last_mut() {
                *slot = latest;
            }
            debug!(date = %latest.date, price = latest.price, "Replaced in-progress week");
            return MergeOutcome::Replaced;
        }
        return MergeOutcome::Unchanged;
    }

    let before = persisted.len();
    if policy == MergePolicy::FillMissedWeeks {
        persisted.extend(
            candidate
                .into_iter()
                .filter(|week| week_start(week.date) > stored_key),
        );
    } else {
        persisted.push(latest);
    }
    let appended = persisted.len() - before;

    for week in &persisted[before..] {
        info!(date = %week.date, price = week.price, "Added new week: {} at ${}", week.date, week.price);
    }

    MergeOutcome::Appended(appended)
}
