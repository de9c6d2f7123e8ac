// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! DNS resolution capability for load-balancer hostnames.
//!
//! The reconciler never calls a resolver library directly; it goes through
//! the narrow [`Resolver`] trait so tests can substitute a canned
//! implementation. The production implementation is backed by the hickory
//! resolver configured from the host's system DNS settings.
//!
//! No caching, no retries, no TTL honoring happens here: the reconcile
//! scheduler decides when hostname-backed addresses are re-checked, and a
//! fresh lookup is made on every pass.

use crate::errors::ResolveError;
use async_trait::async_trait;
use hickory_resolver::TokioAsyncResolver;

/// Capability to resolve a hostname into its current set of addresses.
///
/// Implementations return the addresses in resolver order; callers own any
/// canonicalization. An empty answer is a valid result, not an error.
#[async_trait]
pub trait Resolver: Send + Sync {
    /// Look up all addresses currently behind `hostname`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::LookupFailed`] if the lookup cannot be
    /// completed (NXDOMAIN, timeout, transport failure).
    async fn lookup_host(&self, hostname: &str) -> Result<Vec<String>, ResolveError>;
}

/// Production resolver backed by hickory-resolver and the system DNS
/// configuration (`/etc/resolv.conf` on Unix).
pub struct HickoryResolver {
    inner: TokioAsyncResolver,
}

impl HickoryResolver {
    /// Create a resolver from the system DNS configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the system configuration cannot be read or
    /// contains no usable name servers.
    pub fn from_system_conf() -> anyhow::Result<Self> {
        let inner = TokioAsyncResolver::tokio_from_system_conf()?;
        Ok(Self { inner })
    }
}

#[async_trait]
impl Resolver for HickoryResolver {
    async fn lookup_host(&self, hostname: &str) -> Result<Vec<String>, ResolveError> {
        let lookup = self.inner.lookup_ip(hostname).await.map_err(|err| {
            ResolveError::LookupFailed {
                hostname: hostname.to_string(),
                reason: err.to_string(),
            }
        })?;

        Ok(lookup.iter().map(|ip| ip.to_string()).collect())
    }
}
