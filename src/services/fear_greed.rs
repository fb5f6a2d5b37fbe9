//! alternative.me Fear & Greed Index

use async_trait::async_trait;
use backon::Retryable;
use serde::Deserialize;
use std::time::Duration;
use tracing::{info, warn};

use super::error::FetchError;
use super::market_data::{
    build_client, check_status, normalize_base_url, retry_policy, SentimentSource,
};
use crate::models::FearGreedIndex;

const PROVIDER: &str = "alternative.me";

#[derive(Debug, Deserialize)]
struct FngResponse {
    data: Vec<FngEntry>,
}

#[derive(Debug, Deserialize)]
struct FngEntry {
    value: String,
    value_classification: String,
    timestamp: String,
}

impl TryFrom<FngEntry> for FearGreedIndex {
    type Error = FetchError;

    fn try_from(entry: FngEntry) -> Result<Self, Self::Error> {
        let value: u8 = entry
            .value
            .trim()
            .parse()
            .ok()
            .filter(|v| *v <= 100)
            .ok_or_else(|| parse_error(format!("value '{}' is not in 0-100", entry.value)))?;
        let timestamp = entry
            .timestamp
            .trim()
            .parse()
            .map_err(|_| parse_error(format!("invalid timestamp '{}'", entry.timestamp)))?;

        Ok(FearGreedIndex {
            value,
            classification: entry.value_classification,
            timestamp,
        })
    }
}

pub struct FearGreedClient {
    base_url: String,
    client: reqwest::Client,
}

impl FearGreedClient {
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        Ok(Self::with_client(
            base_url,
            build_client(PROVIDER, Duration::from_secs(10))?,
        ))
    }

    pub fn with_client(base_url: &str, client: reqwest::Client) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            client,
        }
    }

    async fn fetch_once(&self) -> Result<FearGreedIndex, FetchError> {
        let url = format!("{}/fng/", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("limit", "1")])
            .send()
            .await
            .map_err(|source| FetchError::Http {
                provider: PROVIDER,
                source,
            })?;

        let body: FngResponse = check_status(PROVIDER, response)
            .await?
            .json()
            .await
            .map_err(|e| parse_error(e.to_string()))?;

        body.data
            .into_iter()
            .next()
            .ok_or_else(|| parse_error("empty data array"))?
            .try_into()
    }
}

#[async_trait]
impl SentimentSource for FearGreedClient {
    async fn fear_greed(&self) -> Result<FearGreedIndex, FetchError> {
        let index = (|| self.fetch_once())
            .retry(retry_policy())
            .when(FetchError::is_transient)
            .notify(|e, after| warn!(error = %e, retry_in = ?after, "Fear & Greed request failed, retrying"))
            .await?;
        info!(
            value = index.value,
            classification = %index.classification,
            "Fear & Greed Index: {} ({})",
            index.value,
            index.classification
        );
        Ok(index)
    }
}

fn parse_error(message: impl Into<String>) -> FetchError {
    FetchError::Parse {
        provider: PROVIDER,
        message: message.into(),
    }
}
