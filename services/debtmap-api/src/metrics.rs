//! Prometheus metrics for upstream and proxy traffic.
//!
//! Series are labelled by upstream key (`LP`, `NGDPD`, ...) or `MAP` for
//! the GeoJSON relay.

use std::time::Duration;

use anyhow::{Context, Result};
use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Label used for the map relay.
pub const MAP_SOURCE: &str = "MAP";

/// Install the global Prometheus recorder.
pub fn install_recorder() -> Result<PrometheusHandle> {
    PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")
}

/// Record one request to an upstream endpoint.
pub fn record_upstream_request(source: &'static str, success: bool, elapsed: Duration) {
    let outcome = if success { "ok" } else { "error" };
    counter!(
        "debtmap_upstream_requests_total",
        "indicator" => source,
        "outcome" => outcome
    )
    .increment(1);
    histogram!(
        "debtmap_upstream_request_seconds",
        "indicator" => source
    )
    .record(elapsed.as_secs_f64());
}

/// Record one answered proxy request.
pub fn record_proxy_request(source: &'static str, status: u16) {
    counter!(
        "debtmap_proxy_requests_total",
        "indicator" => source,
        "status" => status.to_string()
    )
    .increment(1);
}
