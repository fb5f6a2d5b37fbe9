//! Prometheus metrics for the HTTP surface and the refresh cycle

use prometheus::{Encoder, Gauge, Histogram, HistogramOpts, IntCounter, IntGauge, Registry, TextEncoder};

pub struct Metrics {
    registry: Registry,
    pub http_requests_total: IntCounter,
    pub http_requests_in_flight: IntGauge,
    pub http_request_duration_seconds: Histogram,
    pub refresh_cycles_total: IntCounter,
    pub refresh_failures_total: IntCounter,
    pub refresh_duration_seconds: Histogram,
    pub persistence_failures_total: IntCounter,
    pub weekly_series_length: IntGauge,
    pub last_rsi: Gauge,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total =
            IntCounter::new("http_requests_total", "Total number of HTTP requests")?;
        let http_requests_in_flight = IntGauge::new(
            "http_requests_in_flight",
            "Number of HTTP requests currently being served",
        )?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        ))?;
        let refresh_cycles_total =
            IntCounter::new("refresh_cycles_total", "Completed refresh cycles")?;
        let refresh_failures_total = IntCounter::new(
            "refresh_failures_total",
            "Refresh cycles aborted by an upstream failure",
        )?;
        let refresh_duration_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "refresh_duration_seconds",
                "Duration of a refresh cycle including upstream fetches",
            )
            .buckets(vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        )?;
        let persistence_failures_total = IntCounter::new(
            "persistence_failures_total",
            "Failed writes of the weekly series",
        )?;
        let weekly_series_length =
            IntGauge::new("weekly_series_length", "Number of persisted weekly prices")?;
        let last_rsi = Gauge::new("last_rsi", "Most recent daily RSI (14)")?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(refresh_cycles_total.clone()))?;
        registry.register(Box::new(refresh_failures_total.clone()))?;
        registry.register(Box::new(refresh_duration_seconds.clone()))?;
        registry.register(Box::new(persistence_failures_total.clone()))?;
        registry.register(Box::new(weekly_series_length.clone()))?;
        registry.register(Box::new(last_rsi.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_requests_in_flight,
            http_request_duration_seconds,
            refresh_cycles_total,
            refresh_failures_total,
            refresh_duration_seconds,
            persistence_failures_total,
            weekly_series_length,
            last_rsi,
        })
    }

    /// Render all metrics in the Prometheus text exposition format
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
