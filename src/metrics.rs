// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Prometheus metrics for the readvertiser.
//!
//! All metrics live in a dedicated registry and are exposed over the
//! `/metrics` endpoint served by [`router`]. The metric set tracks the
//! reconcile loop's externally observable behavior: pass outcomes, pass
//! duration, resolution failures and endpoint writes.

use axum::routing::get;
use axum::Router;
use prometheus::{
    Counter, CounterVec, Encoder, Histogram, HistogramOpts, Opts, Registry, TextEncoder,
};
use std::sync::LazyLock;
use std::time::Duration;

/// Namespace prefix for all readvertiser metrics
const METRICS_NAMESPACE: &str = "readvertiser";

/// Global Prometheus metrics registry
///
/// All metrics are registered in this registry and exposed via the
/// `/metrics` endpoint.
pub static METRICS_REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

/// Total number of reconciliation passes by outcome
///
/// Labels:
/// - `outcome`: `noop`, `created`, `updated` or `error`
pub static RECONCILIATION_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_reconciliations_total"),
        "Total number of reconciliation passes by outcome",
    );
    let counter = CounterVec::new(opts, &["outcome"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .unwrap();
    counter
});

/// Duration of reconciliation passes in seconds
pub static RECONCILIATION_DURATION_SECONDS: LazyLock<Histogram> = LazyLock::new(|| {
    let opts = HistogramOpts::new(
        format!("{METRICS_NAMESPACE}_reconciliation_duration_seconds"),
        "Duration of reconciliation passes in seconds",
    )
    .buckets(vec![0.001, 0.01, 0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0]);
    let histogram = Histogram::with_opts(opts).unwrap();
    METRICS_REGISTRY
        .register(Box::new(histogram.clone()))
        .unwrap();
    histogram
});

/// Total number of failed hostname resolutions
pub static RESOLUTION_FAILURES_TOTAL: LazyLock<Counter> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_resolution_failures_total"),
        "Total number of failed load balancer hostname resolutions",
    );
    let counter = Counter::with_opts(opts).unwrap();
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .unwrap();
    counter
});

/// Total number of endpoint record writes by kind
///
/// Labels:
/// - `kind`: `create` or `update`
pub static ENDPOINT_WRITES_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_endpoint_writes_total"),
        "Total number of endpoint record writes by kind",
    );
    let counter = CounterVec::new(opts, &["kind"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .unwrap();
    counter
});

/// Record a completed pass with its outcome label and duration.
pub fn record_reconciliation(outcome: &str, duration: Duration) {
    RECONCILIATION_TOTAL.with_label_values(&[outcome]).inc();
    RECONCILIATION_DURATION_SECONDS.observe(duration.as_secs_f64());
}

/// Render the registry in Prometheus text exposition format.
#[must_use]
pub fn render() -> String {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    if encoder
        .encode(&METRICS_REGISTRY.gather(), &mut buffer)
        .is_err()
    {
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

/// Router serving `/metrics` and `/healthz`.
#[must_use]
pub fn router() -> Router {
    Router::new()
        .route("/metrics", get(|| async { render() }))
        .route("/healthz", get(|| async { "ok" }))
}

#[cfg(test)]
#[path = "metrics_tests.rs"]
mod metrics_tests;
