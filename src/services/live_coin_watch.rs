//! Live Coin Watch spot price

use async_trait::async_trait;
use backon::Retryable;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{info, warn};

use super::error::FetchError;
use super::market_data::{
    build_client, check_status, normalize_base_url, retry_policy, SpotPriceSource,
};

const PROVIDER: &str = "livecoinwatch";

#[derive(Debug, Deserialize)]
struct CoinResponse {
    rate: f64,
}

pub struct LiveCoinWatchClient {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl LiveCoinWatchClient {
    pub fn new(base_url: &str, api_key: Option<String>) -> Result<Self, FetchError> {
        Ok(Self::with_client(
            base_url,
            api_key,
            build_client(PROVIDER, Duration::from_secs(10))?,
        ))
    }

    pub fn with_client(base_url: &str, api_key: Option<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            api_key,
            client,
        }
    }

    async fn fetch_once(&self, api_key: &str) -> Result<f64, FetchError> {
        let url = format!("{}/coins/single", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("x-api-key", api_key)
            .json(&json!({ "currency": "USD", "code": "BTC", "meta": true }))
            .send()
            .await
            .map_err(|source| FetchError::Http {
                provider: PROVIDER,
                source,
            })?;

        let coin: CoinResponse = check_status(PROVIDER, response)
            .await?
            .json()
            .await
            .map_err(|e| FetchError::Parse {
                provider: PROVIDER,
                message: e.to_string(),
            })?;
        Ok(coin.rate)
    }
}

#[async_trait]
impl SpotPriceSource for LiveCoinWatchClient {
    async fn current_price(&self) -> Result<f64, FetchError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| FetchError::Config {
            provider: PROVIDER,
            message: "LCW_API_KEY is not set".to_string(),
        })?;

        let price = (|| self.fetch_once(api_key))
            .retry(retry_policy())
            .when(FetchError::is_transient)
            .notify(|e, after| warn!(error = %e, retry_in = ?after, "Live Coin Watch request failed, retrying"))
            .await?;
        info!(price = price, "Current Bitcoin price: ${:.2}", price);
        Ok(price)
    }
}
