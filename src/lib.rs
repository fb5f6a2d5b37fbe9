//! Bitcoin price and sentiment tracker.
//!
//! Daily closes are folded into a persisted weekly series; RSI and moving
//! averages over both series feed a simple fear & greed gated buy/sell signal.

pub mod config;
pub mod core;
pub mod db;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod series;
pub mod services;
pub mod signals;
