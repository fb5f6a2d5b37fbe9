//! Upstream data source interfaces and the shared HTTP plumbing behind them.

use async_trait::async_trait;
use backon::ExponentialBuilder;
use std::time::Duration;

use super::error::FetchError;
use crate::models::{DailySeries, FearGreedIndex};

/// Daily BTC/USD closes, ascending with unique dates
#[async_trait]
pub trait DailyPriceSource: Send + Sync {
    async fn daily_prices(&self) -> Result<DailySeries, FetchError>;
}

/// Latest spot BTC/USD price
#[async_trait]
pub trait SpotPriceSource: Send + Sync {
    async fn current_price(&self) -> Result<f64, FetchError>;
}

/// Market sentiment reading
#[async_trait]
pub trait SentimentSource: Send + Sync {
    async fn fear_greed(&self) -> Result<FearGreedIndex, FetchError>;
}

pub(crate) const MAX_RETRIES: usize = 3;

/// Backoff used for every upstream request
pub(crate) fn retry_policy() -> ExponentialBuilder {
    ExponentialBuilder::default()
        .with_min_delay(Duration::from_millis(250))
        .with_max_delay(Duration::from_secs(5))
        .with_max_times(MAX_RETRIES)
}

pub(crate) fn build_client(
    provider: &'static str,
    timeout: Duration,
) -> Result<reqwest::Client, FetchError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|source| FetchError::Http { provider, source })
}

pub(crate) fn normalize_base_url(base_url: &str) -> String {
    base_url.trim().trim_end_matches('/').to_string()
}

/// Reject non-2xx responses, keeping the body for the error message
pub(crate) async fn check_status(
    provider: &'static str,
    response: reqwest::Response,
) -> Result<reqwest::Response, FetchError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(FetchError::Status {
        provider,
        status: status.as_u16(),
        body,
    })
}
