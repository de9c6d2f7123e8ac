// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Desired address set construction and equivalence checking.
//!
//! A load balancer advertises one or more ingress points, each a literal IP
//! and/or a hostname. This module turns that list into a canonical desired
//! address set for the current reconciliation pass, and compares it against
//! the address set currently stored in the `Endpoints` record.
//!
//! Equivalence is full unordered set equality in both directions: an address
//! missing from either side is a mismatch. Containment-style checks
//! under-detect removed addresses and must not be used here.

use crate::errors::ResolveError;
use crate::resolver::Resolver;
use k8s_openapi::api::core::v1::{Endpoints, LoadBalancerIngress};
use std::collections::BTreeSet;
use tracing::debug;

/// The deduplicated address set a reconciliation pass wants the endpoint
/// record to contain, plus whether any hostname resolution contributed to it.
///
/// Recomputed from scratch every pass and discarded afterwards. The backing
/// `BTreeSet` keeps members in ascending lexicographic order, which is the
/// canonical order addresses are written in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DesiredAddresses {
    addresses: BTreeSet<String>,
    /// True if at least one ingress point required hostname resolution.
    ///
    /// Hostname-backed addresses can change without any cluster-side
    /// notification, so this flag drives the deferred re-check.
    pub has_hostnames: bool,
}

impl DesiredAddresses {
    /// True if no addresses were produced. A valid, stable result — never an
    /// error, and never a reason to write.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    /// Number of distinct addresses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    /// Members in canonical (ascending lexicographic) order.
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.addresses.iter()
    }

    /// Full unordered set equality against a currently stored address set.
    ///
    /// Both sets must contain exactly the same elements; extra elements in
    /// either direction are a mismatch.
    #[must_use]
    pub fn matches(&self, current: &BTreeSet<String>) -> bool {
        self.addresses == *current
    }

    #[cfg(test)]
    pub(crate) fn from_parts(addresses: BTreeSet<String>, has_hostnames: bool) -> Self {
        Self {
            addresses,
            has_hostnames,
        }
    }
}

/// Build the desired address set from a load balancer's ingress points.
///
/// Literal IPs are inserted directly; hostnames are resolved through the
/// injected [`Resolver`] and every returned address is inserted. An ingress
/// point may carry both an IP and a hostname — both contribute.
///
/// # Errors
///
/// Returns [`ResolveError`] as soon as any hostname fails to resolve. The
/// whole pass aborts: a partial set must not silently drop the addresses
/// behind the failed hostname.
pub async fn desired_addresses(
    ingress: &[LoadBalancerIngress],
    resolver: &dyn Resolver,
) -> Result<DesiredAddresses, ResolveError> {
    let mut desired = DesiredAddresses::default();

    for point in ingress {
        if let Some(hostname) = point.hostname.as_deref().filter(|h| !h.is_empty()) {
            desired.has_hostnames = true;
            let records = resolver.lookup_host(hostname).await?;
            debug!(hostname, records = ?records, "resolved load balancer hostname");
            desired.addresses.extend(records);
        }
        if let Some(ip) = point.ip.as_deref().filter(|ip| !ip.is_empty()) {
            desired.addresses.insert(ip.to_string());
        }
    }

    Ok(desired)
}

/// Flatten an `Endpoints` record into its stored address set: the union of
/// all subsets' ready addresses.
#[must_use]
pub fn current_addresses(endpoints: &Endpoints) -> BTreeSet<String> {
    endpoints
        .subsets
        .iter()
        .flatten()
        .flat_map(|subset| subset.addresses.iter().flatten())
        .map(|addr| addr.ip.clone())
        .collect()
}

#[cfg(test)]
#[path = "addresses_tests.rs"]
mod addresses_tests;
