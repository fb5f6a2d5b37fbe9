//! Weekly series construction and maintenance.

pub mod merge;
pub mod weekly;

pub use merge::{merge_weekly, MergeOutcome, MergePolicy};
pub use weekly::{aggregate_to_weekly, week_start};
