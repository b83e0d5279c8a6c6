//! Metrics collection and exposition.
//!
//! # Metrics
//! - `hit_counter_requests_total` (counter): requests by route, status
//! - `hit_counter_request_duration_seconds` (histogram): latency by route
//! - `hit_counter_pool_allocated` (gauge): permits currently held
//! - `hit_counter_pool_rejections_total` (counter): soft-limit rejections
//! - `hit_counter_store_errors_total` (counter): failed increments by kind
//!
//! Recording is a no-op until [`init_metrics`] installs the Prometheus recorder.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and serve `/metrics` on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_request(route: &'static str, status: u16, start: Instant) {
    metrics::counter!(
        "hit_counter_requests_total",
        "route" => route,
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("hit_counter_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}

pub fn set_pool_allocated(allocated: usize) {
    metrics::gauge!("hit_counter_pool_allocated").set(allocated as f64);
}

pub fn record_rejection() {
    metrics::counter!("hit_counter_pool_rejections_total").increment(1);
}

pub fn record_store_error(kind: &'static str) {
    metrics::counter!("hit_counter_store_errors_total", "kind" => kind).increment(1);
}
