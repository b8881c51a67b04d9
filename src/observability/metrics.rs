//! Metrics collection and exposition.
//!
//! # Metrics
//! - `retry_attempts_total` (counter): retries issued by the interceptor
//! - `retry_exhausted_total` (counter): requests that spent their retry limit
//! - `login_requests_total` (counter): login attempts by response status
//!
//! Without an installed recorder the macros are no-ops.

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_retry() {
    metrics::counter!("retry_attempts_total").increment(1);
}

pub fn record_retry_exhausted() {
    metrics::counter!("retry_exhausted_total").increment(1);
}

pub fn record_login(status: u16) {
    metrics::counter!("login_requests_total", "status" => status.to_string()).increment(1);
}
