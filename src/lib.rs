// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! # Readvertiser - Load-Balancer Endpoint Readvertiser for Kubernetes
//!
//! The readvertiser keeps a cluster-visible `Endpoints` record synchronized
//! with the real addresses behind an external load balancer fronting a
//! control-plane service. Cluster-internal clients resolve the well-known
//! endpoint name to reach the control plane; when the load balancer's
//! address set drifts (DNS round-robin change, IP reassignment, hostname
//! re-resolution), the record is corrected with minimal, idempotent writes.
//!
//! ## Modules
//!
//! - [`addresses`] - Desired address set construction and equivalence
//! - [`subsets`] - Endpoint subset synthesis from addresses and ports
//! - [`resolver`] - Pluggable DNS resolution capability
//! - [`store`] - Pluggable persistence capability for the endpoint record
//! - [`reconcilers`] - The resolve → compare → write reconciliation pass
//! - [`context`] - Dependency-injected context for the controller
//! - [`events`] - Fire-and-forget sync notifications
//! - [`metrics`] - Prometheus metrics and the `/metrics` endpoint
//! - [`options`] - Command-line configuration
//!
//! ## Reconciliation contract
//!
//! One pass issues at most one write. An already-converged record produces
//! zero writes; an empty desired address set is a stable no-op, never an
//! error; a hostname resolution failure aborts the pass before any write.
//! Successful passes involving hostname-backed addresses arm a deferred
//! re-check, because DNS-side changes produce no cluster-side notification.

pub mod addresses;
pub mod constants;
pub mod context;
pub mod errors;
pub mod events;
pub mod metrics;
pub mod options;
pub mod reconcilers;
pub mod resolver;
pub mod store;
pub mod subsets;
