// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `options.rs`

use crate::options::{parse_period, Options};
use clap::Parser;
use std::time::Duration;

#[test]
fn test_parse_period_seconds() {
    assert_eq!(parse_period("30s").unwrap(), Duration::from_secs(30));
    assert_eq!(parse_period("1s").unwrap(), Duration::from_secs(1));
}

#[test]
fn test_parse_period_minutes() {
    assert_eq!(parse_period("5m").unwrap(), Duration::from_secs(300));
}

#[test]
fn test_parse_period_hours() {
    assert_eq!(parse_period("1h").unwrap(), Duration::from_secs(3600));
    assert_eq!(parse_period("24h").unwrap(), Duration::from_secs(86_400));
}

#[test]
fn test_parse_period_rejects_invalid_input() {
    assert!(parse_period("").is_err());
    assert!(parse_period("30").is_err(), "missing unit");
    assert!(parse_period("30x").is_err(), "unknown unit");
    assert!(parse_period("s").is_err(), "missing value");
    assert!(parse_period("0s").is_err(), "zero period");
    assert!(parse_period("25h").is_err(), "above maximum");
}

#[test]
fn test_defaults() {
    let opts = Options::try_parse_from(["readvertiser", "--service-namespace", "shoot--test"])
        .unwrap();

    assert_eq!(opts.service_name, "kube-apiserver");
    assert_eq!(opts.service_namespace, "shoot--test");
    assert_eq!(opts.endpoint_name, "kubernetes");
    assert_eq!(opts.endpoint_namespace, "default");
    assert_eq!(opts.hostname_refresh_period, Duration::from_secs(30));
    assert_eq!(opts.metrics_addr, "0.0.0.0:8080");
    assert!(opts.validate().is_ok());
}

#[test]
fn test_service_namespace_is_required() {
    assert!(Options::try_parse_from(["readvertiser"]).is_err());
}

#[test]
fn test_flag_overrides() {
    let opts = Options::try_parse_from([
        "readvertiser",
        "--service-name",
        "api-lb",
        "--service-namespace",
        "control-plane",
        "--endpoint-name",
        "api",
        "--endpoint-namespace",
        "kube-system",
        "--hostname-refresh-period",
        "2m",
        "--metrics-addr",
        "127.0.0.1:9090",
    ])
    .unwrap();

    assert_eq!(opts.service_name, "api-lb");
    assert_eq!(opts.endpoint_name, "api");
    assert_eq!(opts.endpoint_namespace, "kube-system");
    assert_eq!(opts.hostname_refresh_period, Duration::from_secs(120));
    assert_eq!(opts.metrics_addr, "127.0.0.1:9090");
}

#[test]
fn test_validate_rejects_empty_values() {
    let mut opts =
        Options::try_parse_from(["readvertiser", "--service-namespace", "shoot--test"]).unwrap();

    opts.endpoint_name = String::new();
    assert!(opts.validate().is_err());
}
