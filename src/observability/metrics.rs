//! Metrics collection and exposition.
//!
//! # Metrics
//! - `inertia_responses_total` (counter): rendered pages by `kind` (json, html)
//! - `inertia_version_mismatch_total` (counter): stale-asset full reloads
//! - `inertia_redirect_rewrites_total` (counter): 302 rewritten to 303
//!
//! Without an installed recorder every call is a no-op.

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_response(kind: &'static str) {
    metrics::counter!("inertia_responses_total", "kind" => kind).increment(1);
}

pub fn record_version_mismatch() {
    metrics::counter!("inertia_version_mismatch_total").increment(1);
}

pub fn record_redirect_rewrite() {
    metrics::counter!("inertia_redirect_rewrites_total").increment(1);
}
