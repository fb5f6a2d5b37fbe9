//! Shared data models spanning the tracker layers.

pub mod indicators;
pub mod price;
pub mod sentiment;

pub use indicators::{IndicatorSnapshot, Snapshot, TradeSignal};
pub use price::{closing_prices, round2, DailySeries, PricePoint, WeeklySeries};
pub use sentiment::FearGreedIndex;
