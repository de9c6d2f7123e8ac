// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Shared context for the readvertiser controller.
//!
//! The reconcile function receives an `Arc<Context>` carrying every external
//! capability it needs: the endpoints store, the hostname resolver, the
//! event sink, and the target identity. All dependencies are
//! constructor-supplied — there are no process-wide singletons besides the
//! metrics registry.

use crate::events::EventSink;
use crate::resolver::Resolver;
use crate::store::EndpointsStore;
use std::sync::Arc;
use std::time::Duration;

/// Identity (name, namespace) of the endpoint record being kept in sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointIdentity {
    pub name: String,
    pub namespace: String,
}

impl std::fmt::Display for EndpointIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// Shared context passed to the reconcile function.
#[derive(Clone)]
pub struct Context {
    /// Store handle for the advertised `Endpoints` record
    pub store: Arc<dyn EndpointsStore>,

    /// Resolver for hostname-backed ingress points
    pub resolver: Arc<dyn Resolver>,

    /// Sink for successful sync notifications
    pub events: Arc<dyn EventSink>,

    /// Identity of the endpoint record being reconciled
    pub endpoint: EndpointIdentity,

    /// Name of the monitored `LoadBalancer` service
    pub service_name: String,

    /// Period after which hostname-backed addresses are re-resolved
    pub hostname_refresh: Duration,
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod context_tests;
