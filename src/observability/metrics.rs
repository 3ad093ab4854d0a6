//! Metrics collection and exposition.
//!
//! # Metrics
//! - `employee_proxy_requests_total` (counter): inbound requests by method, route, status
//! - `employee_proxy_request_duration_seconds` (histogram): inbound latency
//! - `employee_proxy_upstream_calls_total` (counter): upstream calls by operation, outcome
//! - `employee_proxy_upstream_retries_total` (counter): rate-limit retries by operation
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus exporter with its own HTTP listener on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    let builder = PrometheusBuilder::new().with_http_listener(addr);

    match builder.install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one handled inbound request.
pub fn record_request(method: &str, route: &str, status: u16, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("route", route.to_string()),
        ("status", status.to_string()),
    ];
    counter!("employee_proxy_requests_total", &labels).increment(1);
    histogram!("employee_proxy_request_duration_seconds", &labels)
        .record(start.elapsed().as_secs_f64());
}

/// Record the final outcome of an upstream operation.
pub fn record_upstream_call(operation: &'static str, outcome: &'static str) {
    counter!(
        "employee_proxy_upstream_calls_total",
        "operation" => operation,
        "outcome" => outcome
    )
    .increment(1);
}

/// Record one rate-limit retry.
pub fn record_upstream_retry(operation: &'static str) {
    counter!("employee_proxy_upstream_retries_total", "operation" => operation).increment(1);
}
