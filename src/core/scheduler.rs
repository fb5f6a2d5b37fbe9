//! Cron-based scheduler for background refresh cycles

use cron::Schedule;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};

use super::refresh::RefreshEngine;

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;

/// Cron expression firing every `interval_seconds`.
///
/// Format: second minute hour day month weekday. A step field restarts at
/// the top of its parent unit, so the interval has to divide that unit
/// evenly to keep a constant period; other intervals are rejected.
pub fn cron_expression(interval_seconds: u64) -> Result<String, String> {
    let uneven = |unit: &str| {
        Err(format!(
            "Refresh interval of {}s does not divide {} evenly",
            interval_seconds, unit
        ))
    };

    match interval_seconds {
        0 => Err("Refresh interval must be positive".to_string()),
        s if s < MINUTE => {
            if MINUTE % s != 0 {
                return uneven("a minute");
            }
            Ok(format!("*/{} * * * * *", s))
        }
        s if s < HOUR => {
            if s % MINUTE != 0 || HOUR % s != 0 {
                return uneven("an hour");
            }
            Ok(format!("0 */{} * * * *", s / MINUTE))
        }
        s if s < DAY => {
            if s % HOUR != 0 || DAY % s != 0 {
                return uneven("a day");
            }
            Ok(format!("0 0 */{} * * *", s / HOUR))
        }
        DAY => Ok("0 0 0 * * *".to_string()),
        s => Err(format!("Refresh interval of {}s is longer than one day", s)),
    }
}

/// Periodically runs a refresh cycle so the weekly series keeps up even
/// when nobody is looking at the dashboard
pub struct RefreshScheduler {
    engine: Arc<RefreshEngine>,
    schedule: Schedule,
    handle: Arc<RwLock<Option<tokio::task::JoinHandle<()>>>>,
}

impl RefreshScheduler {
    /// Create a new scheduler. `interval_seconds` of 0, or one that
    /// `cron_expression` cannot express exactly, is rejected.
    pub fn new(
        engine: Arc<RefreshEngine>,
        interval_seconds: u64,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        if interval_seconds == 0 {
            return Err("Scheduler disabled: interval_seconds is 0".into());
        }

        let cron_expr = cron_expression(interval_seconds).map_err(|e| {
            Box::new(std::io::Error::new(std::io::ErrorKind::InvalidInput, e))
                as Box<dyn std::error::Error + Send + Sync>
        })?;
        let schedule = Schedule::from_str(&cron_expr).map_err(|e| {
            Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Invalid cron expression '{}': {}", cron_expr, e),
            )) as Box<dyn std::error::Error + Send + Sync>
        })?;

        info!(
            interval = interval_seconds,
            cron = %cron_expr,
            "RefreshScheduler: created with interval {}s (cron: {})",
            interval_seconds,
            cron_expr
        );

        Ok(Self {
            engine,
            schedule,
            handle: Arc::new(RwLock::new(None)),
        })
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Start the scheduler
    pub async fn start(&self) {
        let engine = self.engine.clone();
        let schedule = self.schedule.clone();

        let handle = tokio::spawn(async move {
            info!("RefreshScheduler: started, waiting for cron schedule...");

            loop {
                match schedule.upcoming(chrono::Utc).next() {
                    Some(next_tick) => {
                        let now = chrono::Utc::now();
                        if next_tick > now {
                            let duration = (next_tick - now).to_std().unwrap_or_default();
                            tokio::time::sleep(duration).await;
                        }
                    }
                    None => {
                        tokio::time::sleep(tokio::time::Duration::from_secs(60)).await;
                        continue;
                    }
                }

                info!("RefreshScheduler: cron tick, running refresh cycle");
                if let Err(e) = engine.refresh().await {
                    error!(error = %e, "RefreshScheduler: refresh cycle failed");
                }
            }
        });

        *self.handle.write().await = Some(handle);
        info!("RefreshScheduler: started successfully");
    }

    /// Stop the scheduler
    pub async fn stop(&self) {
        if let Some(h) = self.handle.write().await.take() {
            h.abort();
            info!("RefreshScheduler: stopped");
        }
    }

    pub async fn is_running(&self) -> bool {
        self.handle.read().await.is_some()
    }
}
