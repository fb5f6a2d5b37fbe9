//! Persistence of the weekly price series

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use super::error::StoreError;
use crate::models::{PricePoint, WeeklySeries};

/// Durable home of the weekly series. Each call is expected to be
/// crash-consistent on its own.
#[async_trait]
pub trait WeeklyStore: Send + Sync {
    /// Load the stored series, empty when nothing was saved yet
    async fn load(&self) -> Result<WeeklySeries, StoreError>;

    /// Replace the stored series
    async fn save(&self, series: &[PricePoint]) -> Result<(), StoreError>;
}

/// Weekly series kept as a pretty-printed JSON array on disk.
///
/// Saves go to a sibling temporary file which is synced and then renamed
/// over the target, so readers see either the old or the new series.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "weekly_prices.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, path: &Path, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[async_trait]
impl WeeklyStore for JsonFileStore {
    async fn load(&self) -> Result<WeeklySeries, StoreError> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No weekly price file yet");
                return Ok(Vec::new());
            }
            Err(e) => return Err(self.io_error(&self.path, e)),
        };

        if raw.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        let series: WeeklySeries =
            serde_json::from_slice(&raw).map_err(|source| StoreError::Format {
                path: self.path.clone(),
                source,
            })?;

        debug!(
            path = %self.path.display(),
            weeks = series.len(),
            "Loaded {} weekly prices",
            series.len()
        );
        Ok(series)
    }

    async fn save(&self, series: &[PricePoint]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(parent, e))?;
        }

        let body = serde_json::to_vec_pretty(series).map_err(|source| StoreError::Format {
            path: self.path.clone(),
            source,
        })?;

        let temp = self.temp_path();
        let mut file = tokio::fs::File::create(&temp)
            .await
            .map_err(|e| self.io_error(&temp, e))?;
        file.write_all(&body)
            .await
            .map_err(|e| self.io_error(&temp, e))?;
        file.sync_all().await.map_err(|e| self.io_error(&temp, e))?;
        drop(file);

        tokio::fs::rename(&temp, &self.path)
            .await
            .map_err(|e| self.io_error(&self.path, e))?;

        info!(
            path = %self.path.display(),
            weeks = series.len(),
            "Saved {} weekly prices to file",
            series.len()
        );
        Ok(())
    }
}

/// In-process store, used in tests and when no data file is configured
#[derive(Default)]
pub struct MemoryStore {
    series: Mutex<WeeklySeries>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(series: WeeklySeries) -> Self {
        Self {
            series: Mutex::new(series),
        }
    }

    /// Current stored series
    pub fn snapshot(&self) -> WeeklySeries {
        self.series
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl WeeklyStore for MemoryStore {
    async fn load(&self) -> Result<WeeklySeries, StoreError> {
        self.series
            .lock()
            .map(|s| s.clone())
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }

    async fn save(&self, series: &[PricePoint]) -> Result<(), StoreError> {
        let mut stored = self
            .series
            .lock()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        *stored = series.to_vec();
        Ok(())
    }
}
