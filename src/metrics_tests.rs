// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `metrics.rs`

use crate::metrics::{record_reconciliation, render, ENDPOINT_WRITES_TOTAL};
use std::time::Duration;

#[test]
fn test_render_exposes_recorded_metrics() {
    record_reconciliation("noop", Duration::from_millis(5));
    ENDPOINT_WRITES_TOTAL.with_label_values(&["create"]).inc();

    let exposition = render();

    assert!(exposition.contains("readvertiser_reconciliations_total"));
    assert!(exposition.contains("outcome=\"noop\""));
    assert!(exposition.contains("readvertiser_reconciliation_duration_seconds"));
    assert!(exposition.contains("readvertiser_endpoint_writes_total"));
    assert!(exposition.contains("kind=\"create\""));
}
