// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Global constants for the readvertiser.
//!
//! This module contains the numeric and string constants used throughout the
//! codebase. Constants are organized by category for easy maintenance.

// ============================================================================
// Client Constants
// ============================================================================

/// Reporting controller name attached to published events
pub const CONTROLLER_NAME: &str = "readvertiser";

// ============================================================================
// Event Constants
// ============================================================================

/// Event reason recorded when an endpoint record is synced successfully
pub const REASON_SYNCED: &str = "Synced";

/// Event action recorded for readvertising writes
pub const ACTION_READVERTISE: &str = "Readvertise";

// ============================================================================
// Flag Defaults
// ============================================================================

/// Default name of the monitored `LoadBalancer` service
pub const DEFAULT_SERVICE_NAME: &str = "kube-apiserver";

/// Default name of the endpoint record to reconcile
pub const DEFAULT_ENDPOINT_NAME: &str = "kubernetes";

/// Default namespace of the endpoint record to reconcile
pub const DEFAULT_ENDPOINT_NAMESPACE: &str = "default";

/// Default period at which hostname-backed addresses are re-resolved
pub const DEFAULT_HOSTNAME_REFRESH_PERIOD: &str = "30s";

/// Default listen address for the metrics endpoint
pub const DEFAULT_METRICS_ADDR: &str = "0.0.0.0:8080";

// ============================================================================
// Scheduling Constants
// ============================================================================

/// Requeue interval applied by the error policy after a failed pass
pub const ERROR_REQUEUE_SECS: u64 = 30;

/// Upper bound on the hostname refresh period (24 hours). A longer period
/// would let DNS-side drift go unnoticed past any reasonable TTL.
pub const MAX_HOSTNAME_REFRESH_SECS: u64 = 86_400;
