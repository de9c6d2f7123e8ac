// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Reconciliation logic for the advertised endpoint record.
//!
//! The readvertiser follows the standard Kubernetes controller pattern:
//!
//! 1. **Watch** - Monitor the monitored service and the endpoint record
//! 2. **Resolve** - Build the desired address set from load-balancer ingress
//! 3. **Compare** - Diff against the stored record (full set equality)
//! 4. **Write** - Apply the single minimal corrective write, if any
//!
//! A pass is logically sequential (resolve → compare → write) with no
//! internal parallelism; the controller runtime guarantees at most one
//! concurrent pass per target identity.

pub mod endpoints;

pub use endpoints::{reconcile_endpoints, Outcome, ReconcileOutcome};
