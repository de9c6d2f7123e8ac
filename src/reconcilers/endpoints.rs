// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! The reconciliation pass: resolve → compare → write.
//!
//! One pass takes a point-in-time snapshot of the monitored service (its
//! declared ports and load-balancer ingress points), computes the desired
//! address set, and corrects the advertised `Endpoints` record with at most
//! one write:
//!
//! - record absent, desired set non-empty → create
//! - record present, addresses set-equal and port layout unchanged → no-op
//! - record present, anything drifted → merge patch replacing only `subsets`
//!
//! An empty desired set never writes: it is a stable outcome, not an error.
//! A resolution failure aborts the pass before any write. On failure the
//! stored record is left exactly as it was; retry belongs to the
//! controller's error policy, never to this pass.

use crate::addresses::{current_addresses, desired_addresses};
use crate::context::Context;
use crate::errors::ReconcileError;
use crate::subsets::{ports_match, synthesize_subsets};
use k8s_openapi::api::core::v1::{Endpoints, Service};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use tracing::{debug, info};

/// What a successful pass did to the stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Record already converged (or desired set empty); zero writes issued.
    NoOp,
    /// Record was absent and has been created.
    Created,
    /// Record existed and its subsets were replaced.
    Updated,
}

impl Outcome {
    /// Label used for metrics and logging.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::NoOp => "noop",
            Outcome::Created => "created",
            Outcome::Updated => "updated",
        }
    }
}

/// Result of a successful pass, consumed by the scheduler wrapper.
///
/// `has_hostnames` drives rescheduling: hostname-backed addresses can change
/// without any cluster-side notification, so a deferred re-check is armed
/// for them. Failed passes are the `Err` side of the pass result instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileOutcome {
    pub outcome: Outcome,
    pub has_hostnames: bool,
}

/// Run one reconciliation pass for the monitored service.
///
/// The service snapshot comes from the watch trigger; the endpoint record is
/// re-read from the store inside the pass so the diff always runs against
/// the latest stored version.
///
/// # Errors
///
/// Returns [`ReconcileError`] if hostname resolution or the store
/// read/write fails. No write is attempted after a resolution failure, and
/// at most one write is issued per pass.
pub async fn reconcile_endpoints(
    ctx: &Context,
    service: &Service,
) -> Result<ReconcileOutcome, ReconcileError> {
    debug!(service = %ctx.service_name, endpoint = %ctx.endpoint, "reconciling");

    let ingress = service
        .status
        .as_ref()
        .and_then(|status| status.load_balancer.as_ref())
        .and_then(|lb| lb.ingress.as_deref())
        .unwrap_or_default();

    let ports = service
        .spec
        .as_ref()
        .and_then(|spec| spec.ports.as_deref())
        .unwrap_or_default();

    let desired = desired_addresses(ingress, ctx.resolver.as_ref()).await?;
    let has_hostnames = desired.has_hostnames;

    if desired.is_empty() {
        debug!(endpoint = %ctx.endpoint, "no load balancer addresses available, skipping");
        return Ok(ReconcileOutcome {
            outcome: Outcome::NoOp,
            has_hostnames,
        });
    }

    let current = ctx.store.get(&ctx.endpoint.name).await?;

    let outcome = match current {
        None => {
            let record = Endpoints {
                metadata: ObjectMeta {
                    name: Some(ctx.endpoint.name.clone()),
                    namespace: Some(ctx.endpoint.namespace.clone()),
                    ..Default::default()
                },
                subsets: Some(synthesize_subsets(ports, &desired)),
            };
            info!(endpoint = %ctx.endpoint, addresses = desired.len(), "creating endpoint record");
            ctx.store.create(&record).await?;
            Outcome::Created
        }
        Some(existing) => {
            let stored = current_addresses(&existing);
            if desired.matches(&stored) && ports_match(&existing, ports) {
                debug!(endpoint = %ctx.endpoint, "endpoint record already converged");
                Outcome::NoOp
            } else {
                let subsets = synthesize_subsets(ports, &desired);
                info!(
                    endpoint = %ctx.endpoint,
                    stored = ?stored,
                    desired = ?desired.iter().collect::<Vec<_>>(),
                    "load balancer addresses drifted, patching endpoint record"
                );
                ctx.store.patch_subsets(&ctx.endpoint.name, &subsets).await?;
                Outcome::Updated
            }
        }
    };

    if outcome != Outcome::NoOp {
        let summary = format!("Endpoints \"{}\" synced successfully", ctx.endpoint);
        ctx.events.synced(&ctx.endpoint, &summary).await;
    }

    Ok(ReconcileOutcome {
        outcome,
        has_hostnames,
    })
}

#[cfg(test)]
#[path = "endpoints_tests.rs"]
mod endpoints_tests;
