// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Error types for the readvertiser reconciliation pass.
//!
//! This module provides specialized error types for:
//! - DNS resolution of load-balancer hostnames
//! - Endpoints store reads and writes (create, patch)
//! - The composite reconciliation error surfaced to the controller
//!
//! Two conditions are deliberately *not* errors: a missing `Endpoints`
//! record (the store returns `None`, which drives the create path) and an
//! empty desired address set (a legitimate, stable no-op outcome).

use thiserror::Error;

/// Errors that can occur while resolving a load balancer's hostname.
///
/// A resolution failure aborts the whole reconciliation pass: a partially
/// resolved ingress list must never produce a write, because addresses
/// behind the failed hostname would be silently dropped.
#[derive(Error, Debug, Clone)]
pub enum ResolveError {
    /// The DNS lookup for a load-balancer hostname failed.
    #[error("failed to resolve load balancer hostname '{hostname}': {reason}")]
    LookupFailed {
        /// The hostname that could not be resolved
        hostname: String,
        /// The underlying resolver failure
        reason: String,
    },
}

/// Errors that can occur when reading or writing the `Endpoints` record.
///
/// Conflicts are reported distinctly from other API failures so callers can
/// classify them; neither is retried locally. Retry is the controller error
/// policy's responsibility.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The API server rejected a write with a conflict (HTTP 409).
    #[error("conflicting write to endpoints '{namespace}/{name}': {reason}")]
    Conflict {
        /// Name of the endpoints record
        name: String,
        /// Namespace of the endpoints record
        namespace: String,
        /// The API server's conflict message
        reason: String,
    },

    /// Any other Kubernetes API failure (network error, 5xx, authz, ...).
    #[error("endpoints API call failed: {0}")]
    Api(#[source] kube::Error),
}

/// Composite error type for a reconciliation pass.
///
/// This is the `failed(reason)` arm of the reconciliation outcome: the pass
/// returns `Err(ReconcileError)` and the externally observable record is
/// left exactly as it was before the pass.
#[derive(Error, Debug)]
pub enum ReconcileError {
    /// Hostname resolution failed; no write was attempted.
    #[error(transparent)]
    Resolution(#[from] ResolveError),

    /// The endpoints store read or write failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ReconcileError {
    /// Returns true if this error is transient and a re-triggered pass may
    /// succeed without operator intervention.
    ///
    /// Resolution failures and write conflicts are transient: DNS recovers
    /// and conflicts resolve once the informer catches up. API failures are
    /// classified by status code.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Resolution(_) | Self::Store(StoreError::Conflict { .. }) => true,
            Self::Store(StoreError::Api(err)) => match err {
                kube::Error::Api(api_err) => {
                    api_err.code == 429 || (api_err.code >= 500 && api_err.code < 600)
                }
                kube::Error::Service(_) => true,
                _ => false,
            },
        }
    }
}

#[cfg(test)]
#[path = "errors_tests.rs"]
mod errors_tests;
