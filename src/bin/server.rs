//! Bitcoin Tracker server
//!
//! Serves the dashboard API and, when REFRESH_INTERVAL_SECONDS > 0, keeps the
//! weekly series up to date in the background.

use btc_tracker::config::Config;
use btc_tracker::core::{start_server, AppState, HealthStatus, RefreshEngine, RefreshScheduler};
use btc_tracker::db::JsonFileStore;
use btc_tracker::logging;
use btc_tracker::metrics::Metrics;
use btc_tracker::services::{FearGreedClient, KrakenClient, LiveCoinWatchClient};
use dotenvy::dotenv;
use std::sync::Arc;
use std::time::Instant;
use tokio::signal;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let config = Config::from_env();
    info!("Starting Bitcoin Tracker");
    info!(environment = %config.environment, "Environment");
    info!(data_file = %config.data_file.display(), "Weekly price store");
    info!(policy = ?config.merge_policy, "Weekly merge policy");

    if config.upstream.live_coin_watch_key.is_none() {
        warn!("LCW_API_KEY not set, the current price falls back to the latest daily close");
    }

    let metrics = Arc::new(Metrics::new()?);
    let engine = Arc::new(
        RefreshEngine::new(
            Arc::new(KrakenClient::new(&config.upstream.kraken_url)?),
            Arc::new(LiveCoinWatchClient::new(
                &config.upstream.live_coin_watch_url,
                config.upstream.live_coin_watch_key.clone(),
            )?),
            Arc::new(FearGreedClient::new(&config.upstream.fear_greed_url)?),
            Arc::new(JsonFileStore::new(config.data_file.clone())),
        )
        .with_policy(config.merge_policy)
        .with_metrics(metrics.clone()),
    );

    let scheduler = if config.refresh_interval_seconds > 0 {
        let scheduler = RefreshScheduler::new(engine.clone(), config.refresh_interval_seconds)
            .map_err(|e| e.to_string())?;
        scheduler.start().await;
        Some(scheduler)
    } else {
        info!("Background refresh: disabled (set REFRESH_INTERVAL_SECONDS to enable)");
        None
    };

    let state = AppState {
        health: Arc::new(RwLock::new(HealthStatus::default())),
        metrics,
        start_time: Arc::new(Instant::now()),
        engine,
        public_dir: config.public_dir.clone(),
    };

    let port = config.port;
    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(state, port).await {
            error!(error = %e, "HTTP server error");
        }
    });

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down...");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    if let Some(scheduler) = scheduler {
        scheduler.stop().await;
    }

    Ok(())
}
