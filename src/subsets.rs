// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Endpoint subset synthesis from a desired address set and service ports.
//!
//! The synthesizer always produces exactly one merged subset: the address
//! list is the desired set in canonical order, the port list is the
//! service's declared ports copied verbatim. Subset count and port layout
//! are fully determined by the source service, never accumulated
//! historically — which is what makes repeated synthesis idempotent.

use crate::addresses::DesiredAddresses;
use k8s_openapi::api::core::v1::{EndpointAddress, EndpointPort, EndpointSubset, ServicePort};

/// Build the single endpoint subset for the desired addresses and the
/// service's declared ports.
///
/// Addresses come out in ascending lexicographic order regardless of the
/// order ingress points or DNS answers arrived in; ports keep their
/// declaration order and values (name, port, protocol) verbatim.
#[must_use]
pub fn synthesize_subsets(ports: &[ServicePort], desired: &DesiredAddresses) -> Vec<EndpointSubset> {
    let endpoint_ports: Vec<EndpointPort> = ports
        .iter()
        .map(|p| EndpointPort {
            name: p.name.clone(),
            port: p.port,
            protocol: p.protocol.clone(),
            ..Default::default()
        })
        .collect();

    let endpoint_addresses: Vec<EndpointAddress> = desired
        .iter()
        .map(|ip| EndpointAddress {
            ip: ip.clone(),
            ..Default::default()
        })
        .collect();

    vec![EndpointSubset {
        addresses: Some(endpoint_addresses),
        ports: Some(endpoint_ports),
        ..Default::default()
    }]
}

/// Check whether a stored record's subset/port layout still matches what
/// synthesis would produce for the service's current ports.
///
/// Ports are not part of the address comparator's purview, but a record
/// whose port layout drifted from the service (renamed port, changed
/// protocol, extra subset) is always a mismatch requiring rewrite.
#[must_use]
pub fn ports_match(
    endpoints: &k8s_openapi::api::core::v1::Endpoints,
    ports: &[ServicePort],
) -> bool {
    let subsets = endpoints.subsets.as_deref().unwrap_or_default();

    // Synthesis only ever emits one subset; anything else is drift.
    let [subset] = subsets else {
        return false;
    };

    let current = subset.ports.as_deref().unwrap_or_default();
    if current.len() != ports.len() {
        return false;
    }

    current.iter().zip(ports.iter()).all(|(have, want)| {
        have.name == want.name && have.port == want.port && have.protocol == want.protocol
    })
}

#[cfg(test)]
#[path = "subsets_tests.rs"]
mod subsets_tests;
