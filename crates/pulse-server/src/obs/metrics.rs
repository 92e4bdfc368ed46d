//! Instruments published by the demo service.
//!
//! Every handle is registered once at startup against the injected registry.
//! Label values come from the request (method, endpoint, status), so the set
//! of series is bounded by the routes this service exposes.

use std::time::Duration;

use pulse_core::error::Result;
use pulse_core::metrics::{Counter, Gauge, Histogram, Registry, DEFAULT_BUCKETS};

#[derive(Clone)]
pub struct AppMetrics {
    pub requests: Counter,
    pub request_duration: Histogram,
    pub active_users: Gauge,
    pub errors: Counter,
    pub cpu_usage: Gauge,
    pub memory_usage: Gauge,
}

impl AppMetrics {
    pub fn register(registry: &Registry) -> Result<Self> {
        Ok(Self {
            requests: registry.register_counter(
                "http_requests_total",
                "Total HTTP requests",
                &["method", "endpoint", "status"],
            )?,
            request_duration: registry.register_histogram(
                "http_request_duration_seconds",
                "HTTP request duration in seconds",
                &["method", "endpoint"],
                &DEFAULT_BUCKETS,
            )?,
            active_users: registry.register_gauge("active_users", "Number of active users", &[])?,
            errors: registry.register_counter(
                "application_errors_total",
                "Total application errors",
                &["error_type"],
            )?,
            cpu_usage: registry.register_gauge(
                "cpu_usage_percent",
                "Simulated CPU usage percentage",
                &[],
            )?,
            memory_usage: registry.register_gauge(
                "memory_usage_bytes",
                "Simulated memory usage in bytes",
                &[],
            )?,
        })
    }

    /// Count one request by method, endpoint and status code.
    pub fn record_request(&self, method: &str, endpoint: &str, status: u16) -> Result<()> {
        let status = status.to_string();
        self.requests.inc(&[
            ("method", method),
            ("endpoint", endpoint),
            ("status", status.as_str()),
        ])
    }

    pub fn observe_duration(&self, method: &str, endpoint: &str, elapsed: Duration) -> Result<()> {
        self.request_duration.observe(
            &[("method", method), ("endpoint", endpoint)],
            elapsed.as_secs_f64(),
        )
    }

    pub fn record_error(&self, error_type: &str) -> Result<()> {
        self.errors.inc(&[("error_type", error_type)])
    }
}
