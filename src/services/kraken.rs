//! Kraken public OHLC endpoint, used for the daily close history

use async_trait::async_trait;
use backon::Retryable;
use chrono::DateTime;
use serde_json::Value;
use std::time::Duration;
use tracing::{info, warn};

use super::error::FetchError;
use super::market_data::{
    build_client, check_status, normalize_base_url, retry_policy, DailyPriceSource,
};
use crate::models::{DailySeries, PricePoint};

const PROVIDER: &str = "kraken";
const PAIR: &str = "XBTUSD";
const DAILY_INTERVAL_MINUTES: u32 = 1440;
const CLOSE_COLUMN: usize = 4;

pub struct KrakenClient {
    base_url: String,
    client: reqwest::Client,
}

impl KrakenClient {
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        Ok(Self::with_client(
            base_url,
            build_client(PROVIDER, Duration::from_secs(30))?,
        ))
    }

    pub fn with_client(base_url: &str, client: reqwest::Client) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            client,
        }
    }

    async fn fetch_once(&self) -> Result<DailySeries, FetchError> {
        let url = format!("{}/0/public/OHLC", self.base_url);
        let interval = DAILY_INTERVAL_MINUTES.to_string();
        let response = self
            .client
            .get(&url)
            .query(&[("pair", PAIR), ("interval", interval.as_str()), ("since", "0")])
            .send()
            .await
            .map_err(|source| FetchError::Http {
                provider: PROVIDER,
                source,
            })?;

        let body: Value = check_status(PROVIDER, response)
            .await?
            .json()
            .await
            .map_err(|source| FetchError::Http {
                provider: PROVIDER,
                source,
            })?;

        parse_ohlc_response(&body)
    }
}

#[async_trait]
impl DailyPriceSource for KrakenClient {
    async fn daily_prices(&self) -> Result<DailySeries, FetchError> {
        info!("Fetching Bitcoin historical data from Kraken");
        let prices = (|| self.fetch_once())
            .retry(retry_policy())
            .when(FetchError::is_transient)
            .notify(|e, after| warn!(error = %e, retry_in = ?after, "Kraken request failed, retrying"))
            .await?;
        info!(points = prices.len(), "Fetched {} historical data points", prices.len());
        Ok(prices)
    }
}

/// Parse a Kraken OHLC payload into daily closes.
///
/// Rows are `[time, open, high, low, close, vwap, volume, count]` with the
/// prices encoded as strings; the date is the UTC day of `time`.
pub fn parse_ohlc_response(body: &Value) -> Result<DailySeries, FetchError> {
    if let Some(message) = body
        .get("error")
        .and_then(Value::as_array)
        .and_then(|errors| errors.first())
    {
        return Err(FetchError::Upstream {
            provider: PROVIDER,
            message: message.as_str().unwrap_or("unknown error").to_string(),
        });
    }

    let rows = body
        .get("result")
        .and_then(Value::as_object)
        .and_then(|result| {
            result
                .iter()
                .filter(|(key, _)| key.as_str() != "last")
                .find_map(|(_, value)| value.as_array())
        })
        .ok_or_else(|| parse_error("missing OHLC rows in result"))?;

    rows.iter().map(parse_row).collect()
}

fn parse_row(row: &Value) -> Result<PricePoint, FetchError> {
    let timestamp = row
        .get(0)
        .and_then(Value::as_i64)
        .ok_or_else(|| parse_error("candle without timestamp"))?;
    let date = DateTime::from_timestamp(timestamp, 0)
        .ok_or_else(|| parse_error(format!("timestamp {} out of range", timestamp)))?
        .date_naive();

    let close = row
        .get(CLOSE_COLUMN)
        .ok_or_else(|| parse_error("candle without close"))?;
    let price = match close {
        Value::String(s) => s
            .parse::<f64>()
            .map_err(|e| parse_error(format!("invalid close '{}': {}", s, e)))?,
        other => other
            .as_f64()
            .ok_or_else(|| parse_error("close is not a number"))?,
    };

    Ok(PricePoint::new(date, price))
}

fn parse_error(message: impl Into<String>) -> FetchError {
    FetchError::Parse {
        provider: PROVIDER,
        message: message.into(),
    }
}
