//! Refresh engine: fetch, merge, persist and publish one dashboard cycle

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info, warn};

use super::snapshot::compute_snapshot;
use crate::db::{StoreError, WeeklyStore};
use crate::metrics::Metrics;
use crate::models::{round2, FearGreedIndex, PricePoint, Snapshot, WeeklySeries};
use crate::series::{MergeOutcome, MergePolicy};
use crate::services::{DailyPriceSource, FetchError, SentimentSource, SpotPriceSource};

/// Daily points included in the dashboard payload
pub const HISTORY_WINDOW: usize = 365;

#[derive(Error, Debug)]
pub enum RefreshError {
    #[error("Upstream fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Failed to load weekly series: {0}")]
    Load(#[from] StoreError),

    #[error("No price available: spot price failed and daily history is empty")]
    NoPrice,
}

/// Dashboard payload served to the browser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub current_price: f64,
    pub fear_greed_index: FearGreedIndex,
    pub rsi: Option<f64>,
    pub ma50w: Option<f64>,
    pub ma200w: Option<f64>,
    pub ma50d: Option<f64>,
    pub ma200d: Option<f64>,
    pub buy_signal: bool,
    pub sell_signal: bool,
    pub historical_data: Vec<PricePoint>,
    pub weekly_prices: WeeklySeries,
    pub updated_at: DateTime<Utc>,
}

impl DashboardData {
    pub fn from_snapshot(
        snapshot: Snapshot,
        daily: &[PricePoint],
        current_price: f64,
        fear_greed_index: FearGreedIndex,
    ) -> Self {
        let history_start = daily.len().saturating_sub(HISTORY_WINDOW);
        Self {
            current_price,
            fear_greed_index,
            rsi: snapshot.rsi.map(round2),
            ma50w: snapshot.ma_50w.map(round2),
            ma200w: snapshot.ma_200w.map(round2),
            ma50d: snapshot.ma_short.map(round2),
            ma200d: snapshot.ma_long.map(round2),
            buy_signal: snapshot.buy_signal,
            sell_signal: snapshot.sell_signal,
            historical_data: daily[history_start..].to_vec(),
            weekly_prices: snapshot.weekly_series,
            updated_at: Utc::now(),
        }
    }
}

/// Result of a completed cycle. A failed save does not fail the cycle: the
/// merged series is kept in memory and the write is retried next cycle.
#[derive(Debug)]
pub struct CycleReport {
    pub data: Arc<DashboardData>,
    pub merge: MergeOutcome,
    pub persist_error: Option<StoreError>,
}

#[derive(Default)]
struct WeeklyState {
    /// `None` until the store has been read
    series: Option<WeeklySeries>,
    /// In-memory series differs from what the store holds
    dirty: bool,
}

pub struct RefreshEngine {
    daily_source: Arc<dyn DailyPriceSource>,
    spot_source: Arc<dyn SpotPriceSource>,
    sentiment_source: Arc<dyn SentimentSource>,
    store: Arc<dyn WeeklyStore>,
    policy: MergePolicy,
    metrics: Option<Arc<Metrics>>,
    /// Held for the whole of a cycle, upstream fetches included
    state: Mutex<WeeklyState>,
    /// Last series a cycle committed, readable while a cycle is in flight
    committed: RwLock<Option<WeeklySeries>>,
    latest: RwLock<Option<Arc<DashboardData>>>,
}

impl RefreshEngine {
    pub fn new(
        daily_source: Arc<dyn DailyPriceSource>,
        spot_source: Arc<dyn SpotPriceSource>,
        sentiment_source: Arc<dyn SentimentSource>,
        store: Arc<dyn WeeklyStore>,
    ) -> Self {
        Self {
            daily_source,
            spot_source,
            sentiment_source,
            store,
            policy: MergePolicy::default(),
            metrics: None,
            state: Mutex::new(WeeklyState::default()),
            committed: RwLock::new(None),
            latest: RwLock::new(None),
        }
    }

    pub fn with_policy(mut self, policy: MergePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Run one refresh cycle.
    ///
    /// Cycles are serialized: a call made while another is in flight waits
    /// for it to finish and then runs against the updated series.
    pub async fn refresh(&self) -> Result<CycleReport, RefreshError> {
        let start = Instant::now();
        let mut state = self.state.lock().await;
        let result = self.run_cycle(&mut state).await;
        drop(state);

        if let Some(ref metrics) = self.metrics {
            metrics
                .refresh_duration_seconds
                .observe(start.elapsed().as_secs_f64());
            match &result {
                Ok(report) => {
                    metrics.refresh_cycles_total.inc();
                    metrics
                        .weekly_series_length
                        .set(report.data.weekly_prices.len() as i64);
                    if let Some(rsi) = report.data.rsi {
                        metrics.last_rsi.set(rsi);
                    }
                    if report.persist_error.is_some() {
                        metrics.persistence_failures_total.inc();
                    }
                }
                Err(_) => metrics.refresh_failures_total.inc(),
            }
        }

        if let Err(ref e) = result {
            error!(error = %e, "Refresh cycle failed");
        }
        result
    }

    async fn run_cycle(&self, state: &mut WeeklyState) -> Result<CycleReport, RefreshError> {
        if state.series.is_none() {
            let loaded = self.store.load().await?;
            if loaded.is_empty() {
                info!("Weekly series is empty, it will be initialized from historical data");
            } else {
                info!(weeks = loaded.len(), "Loaded {} weekly prices", loaded.len());
            }
            *self.committed.write().await = Some(loaded.clone());
            state.series = Some(loaded);
        }

        let (daily, spot, sentiment) = tokio::join!(
            self.daily_source.daily_prices(),
            self.spot_source.current_price(),
            self.sentiment_source.fear_greed(),
        );
        let daily = daily?;
        let sentiment = sentiment?;
        let current_price = match spot {
            Ok(price) => price,
            Err(e) => {
                warn!(error = %e, "Spot price unavailable, using latest daily close");
                daily.last().map(|p| p.price).ok_or(RefreshError::NoPrice)?
            }
        };

        let persisted = state.series.as_deref().unwrap_or(&[]);
        let (snapshot, merge) = compute_snapshot(&daily, persisted, sentiment.value, self.policy);
        debug!(outcome = ?merge, weeks = snapshot.weekly_series.len(), "Merged weekly series");

        state.series = Some(snapshot.weekly_series.clone());
        *self.committed.write().await = Some(snapshot.weekly_series.clone());
        if merge.is_changed() {
            state.dirty = true;
        }

        let persist_error = if state.dirty {
            match self.store.save(&snapshot.weekly_series).await {
                Ok(()) => {
                    state.dirty = false;
                    None
                }
                Err(e) => {
                    error!(error = %e, "Failed to save weekly series, keeping it in memory");
                    Some(e)
                }
            }
        } else {
            None
        };

        info!(
            rsi = ?snapshot.rsi,
            ma_50w = ?snapshot.ma_50w,
            ma_200w = ?snapshot.ma_200w,
            weeks = snapshot.weekly_series.len(),
            buy = snapshot.buy_signal,
            sell = snapshot.sell_signal,
            "Refresh cycle complete"
        );

        let data = Arc::new(DashboardData::from_snapshot(
            snapshot,
            &daily,
            current_price,
            sentiment,
        ));
        *self.latest.write().await = Some(data.clone());

        Ok(CycleReport {
            data,
            merge,
            persist_error,
        })
    }

    /// Weekly series as of the last completed merge, loading it from the
    /// store if no cycle has got that far yet. Never triggers an upstream
    /// fetch and never waits for an in-flight cycle.
    pub async fn weekly_prices(&self) -> Result<WeeklySeries, StoreError> {
        if let Some(ref series) = *self.committed.read().await {
            return Ok(series.clone());
        }
        let loaded = self.store.load().await?;
        let mut committed = self.committed.write().await;
        // A cycle may have committed while the store was being read
        Ok(committed.get_or_insert(loaded).clone())
    }

    /// Payload of the last successful cycle
    pub async fn latest(&self) -> Option<Arc<DashboardData>> {
        self.latest.read().await.clone()
    }
}
