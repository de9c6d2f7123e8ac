// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Command-line options for the readvertiser.
//!
//! The service namespace normally comes from the downward API via the
//! `SERVICE_NAMESPACE` environment variable; every other flag has a default
//! matching the common control-plane deployment (service `kube-apiserver`,
//! endpoint `kubernetes` in `default`).
//!
//! Durations are Go-style strings: `30s`, `5m`, `1h`.

use crate::constants::{
    DEFAULT_ENDPOINT_NAME, DEFAULT_ENDPOINT_NAMESPACE, DEFAULT_HOSTNAME_REFRESH_PERIOD,
    DEFAULT_METRICS_ADDR, DEFAULT_SERVICE_NAME, MAX_HOSTNAME_REFRESH_SECS,
};
use anyhow::{bail, Context, Result};
use clap::Parser;
use std::time::Duration;

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 3600;

/// Options for the readvertiser controller.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "readvertiser",
    about = "Keeps a cluster endpoint record synchronized with the addresses behind an external load balancer",
    version
)]
pub struct Options {
    /// Name of the monitored service of type LoadBalancer
    #[arg(long, default_value = DEFAULT_SERVICE_NAME)]
    pub service_name: String,

    /// Namespace of the monitored service
    #[arg(long, env = "SERVICE_NAMESPACE")]
    pub service_namespace: String,

    /// Name of the endpoint record to reconcile
    #[arg(long, default_value = DEFAULT_ENDPOINT_NAME)]
    pub endpoint_name: String,

    /// Namespace of the endpoint record to reconcile
    #[arg(long, default_value = DEFAULT_ENDPOINT_NAMESPACE)]
    pub endpoint_namespace: String,

    /// Period at which hostname-backed load balancer addresses are re-resolved
    #[arg(long, default_value = DEFAULT_HOSTNAME_REFRESH_PERIOD, value_parser = parse_period)]
    pub hostname_refresh_period: Duration,

    /// Address the metrics endpoint binds to
    #[arg(long, default_value = DEFAULT_METRICS_ADDR)]
    pub metrics_addr: String,
}

impl Options {
    /// Validate option combinations that clap cannot express.
    ///
    /// # Errors
    ///
    /// Returns an error for empty required values or an out-of-bounds
    /// refresh period.
    pub fn validate(&self) -> Result<()> {
        if self.service_name.is_empty() {
            bail!("service-name is required");
        }
        if self.service_namespace.is_empty() {
            bail!("service-namespace is required");
        }
        if self.endpoint_name.is_empty() {
            bail!("endpoint-name is required");
        }
        if self.endpoint_namespace.is_empty() {
            bail!("endpoint-namespace is required");
        }
        Ok(())
    }
}

/// Parse a Go-style period string into a `Duration`.
///
/// Supported units:
/// - `s` (seconds): "30s"
/// - `m` (minutes): "5m"
/// - `h` (hours): "1h"
///
/// The period must be positive and at most 24 hours.
///
/// # Errors
///
/// Returns an error if the format is invalid (missing unit, non-numeric
/// value) or the period is out of bounds.
pub fn parse_period(period_str: &str) -> Result<Duration> {
    if period_str.is_empty() {
        bail!("Period string cannot be empty");
    }

    let split_pos = period_str
        .chars()
        .position(|c| !c.is_ascii_digit())
        .context("Period must end with a unit (s, m, or h)")?;

    let (value_str, unit) = period_str.split_at(split_pos);

    let value: u64 = value_str
        .parse()
        .context("Period value must be a positive integer")?;

    let seconds = match unit {
        "s" => value,
        "m" => value
            .checked_mul(SECONDS_PER_MINUTE)
            .context("Period value too large (overflow)")?,
        "h" => value
            .checked_mul(SECONDS_PER_HOUR)
            .context("Period value too large (overflow)")?,
        _ => bail!("Unsupported period unit '{unit}'. Use 's' (seconds), 'm' (minutes), or 'h' (hours)"),
    };

    if seconds == 0 {
        bail!("Period '{period_str}' must be greater than zero");
    }

    if seconds > MAX_HOSTNAME_REFRESH_SECS {
        bail!("Period '{period_str}' exceeds maximum of 24h");
    }

    Ok(Duration::from_secs(seconds))
}

#[cfg(test)]
#[path = "options_tests.rs"]
mod options_tests;
