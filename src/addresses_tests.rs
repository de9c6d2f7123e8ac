// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `addresses.rs`

use crate::addresses::{current_addresses, desired_addresses, DesiredAddresses};
use crate::errors::ResolveError;
use crate::resolver::Resolver;
use async_trait::async_trait;
use k8s_openapi::api::core::v1::{
    EndpointAddress, EndpointSubset, Endpoints, LoadBalancerIngress,
};
use std::collections::BTreeSet;
use std::sync::Mutex;

/// Fake resolver returning canned addresses or a canned error, recording
/// every hostname it was asked to resolve.
struct FakeResolver {
    addrs: Vec<String>,
    error: Option<String>,
    lookups: Mutex<Vec<String>>,
}

impl FakeResolver {
    fn returning(addrs: &[&str]) -> Self {
        Self {
            addrs: addrs.iter().map(|a| (*a).to_string()).collect(),
            error: None,
            lookups: Mutex::new(Vec::new()),
        }
    }

    fn failing(reason: &str) -> Self {
        Self {
            addrs: Vec::new(),
            error: Some(reason.to_string()),
            lookups: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Resolver for FakeResolver {
    async fn lookup_host(&self, hostname: &str) -> Result<Vec<String>, ResolveError> {
        self.lookups.lock().unwrap().push(hostname.to_string());
        match &self.error {
            Some(reason) => Err(ResolveError::LookupFailed {
                hostname: hostname.to_string(),
                reason: reason.clone(),
            }),
            None => Ok(self.addrs.clone()),
        }
    }
}

fn ip_ingress(ip: &str) -> LoadBalancerIngress {
    LoadBalancerIngress {
        ip: Some(ip.to_string()),
        ..Default::default()
    }
}

fn hostname_ingress(hostname: &str) -> LoadBalancerIngress {
    LoadBalancerIngress {
        hostname: Some(hostname.to_string()),
        ..Default::default()
    }
}

fn set(members: &[&str]) -> BTreeSet<String> {
    members.iter().map(|m| (*m).to_string()).collect()
}

#[tokio::test]
async fn test_literal_ips_only() {
    let resolver = FakeResolver::returning(&[]);
    let ingress = vec![ip_ingress("8.8.8.8"), ip_ingress("8.8.4.4")];

    let desired = desired_addresses(&ingress, &resolver).await.unwrap();

    assert!(!desired.has_hostnames);
    assert_eq!(desired.len(), 2);
    assert!(desired.matches(&set(&["8.8.4.4", "8.8.8.8"])));
    assert!(
        resolver.lookups.lock().unwrap().is_empty(),
        "literal IPs must not hit the resolver"
    );
}

#[tokio::test]
async fn test_hostname_resolution_sets_flag() {
    let resolver = FakeResolver::returning(&["2.2.2.2", "1.1.1.1"]);
    let ingress = vec![hostname_ingress("elb.example.com")];

    let desired = desired_addresses(&ingress, &resolver).await.unwrap();

    assert!(desired.has_hostnames);
    assert!(desired.matches(&set(&["1.1.1.1", "2.2.2.2"])));
    assert_eq!(
        *resolver.lookups.lock().unwrap(),
        vec!["elb.example.com".to_string()]
    );
}

#[tokio::test]
async fn test_mixed_ingress_deduplicates() {
    // Resolver answer overlaps with a literal IP; the set keeps one copy.
    let resolver = FakeResolver::returning(&["1.1.1.1", "8.8.8.8"]);
    let ingress = vec![hostname_ingress("elb.example.com"), ip_ingress("8.8.8.8")];

    let desired = desired_addresses(&ingress, &resolver).await.unwrap();

    assert_eq!(desired.len(), 2);
    assert!(desired.matches(&set(&["1.1.1.1", "8.8.8.8"])));
}

#[tokio::test]
async fn test_resolution_failure_aborts_pass() {
    let resolver = FakeResolver::failing("NXDOMAIN");
    // A literal IP before the hostname must not survive the failure:
    // partial address sets are never used.
    let ingress = vec![ip_ingress("1.1.1.1"), hostname_ingress("gone.example.com")];

    let err = desired_addresses(&ingress, &resolver).await.unwrap_err();

    let ResolveError::LookupFailed { hostname, .. } = err;
    assert_eq!(hostname, "gone.example.com");
}

#[tokio::test]
async fn test_empty_ingress_is_valid() {
    let resolver = FakeResolver::returning(&[]);

    let desired = desired_addresses(&[], &resolver).await.unwrap();

    assert!(desired.is_empty());
    assert!(!desired.has_hostnames);
}

#[tokio::test]
async fn test_hostname_resolving_to_nothing_is_valid() {
    let resolver = FakeResolver::returning(&[]);
    let ingress = vec![hostname_ingress("elb.example.com")];

    let desired = desired_addresses(&ingress, &resolver).await.unwrap();

    assert!(desired.is_empty());
    assert!(desired.has_hostnames);
}

#[tokio::test]
async fn test_empty_string_fields_are_ignored() {
    let resolver = FakeResolver::returning(&[]);
    let ingress = vec![LoadBalancerIngress {
        ip: Some(String::new()),
        hostname: Some(String::new()),
        ..Default::default()
    }];

    let desired = desired_addresses(&ingress, &resolver).await.unwrap();

    assert!(desired.is_empty());
    assert!(!desired.has_hostnames);
    assert!(resolver.lookups.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_order_insensitive_construction() {
    let resolver = FakeResolver::returning(&[]);
    let forward = vec![ip_ingress("1.1.1.1"), ip_ingress("2.2.2.2")];
    let reverse = vec![ip_ingress("2.2.2.2"), ip_ingress("1.1.1.1")];

    let a = desired_addresses(&forward, &resolver).await.unwrap();
    let b = desired_addresses(&reverse, &resolver).await.unwrap();

    assert_eq!(a, b);
    let canonical: Vec<&String> = a.iter().collect();
    assert_eq!(canonical, ["1.1.1.1", "2.2.2.2"]);
}

#[test]
fn test_matches_requires_full_set_equality() {
    let desired = DesiredAddresses::from_parts(set(&["1.1.1.1", "2.2.2.2"]), false);

    // A stored record missing an address is different...
    assert!(!desired.matches(&set(&["1.1.1.1"])));
    // ...and so is a stored record with an extra address.
    let smaller = DesiredAddresses::from_parts(set(&["1.1.1.1"]), false);
    assert!(!smaller.matches(&set(&["1.1.1.1", "2.2.2.2"])));

    assert!(desired.matches(&set(&["2.2.2.2", "1.1.1.1"])));
}

#[test]
fn test_current_addresses_flattens_all_subsets() {
    let endpoints = Endpoints {
        subsets: Some(vec![
            EndpointSubset {
                addresses: Some(vec![
                    EndpointAddress {
                        ip: "1.1.1.1".to_string(),
                        ..Default::default()
                    },
                    EndpointAddress {
                        ip: "2.2.2.2".to_string(),
                        ..Default::default()
                    },
                ]),
                ..Default::default()
            },
            EndpointSubset {
                addresses: Some(vec![EndpointAddress {
                    ip: "1.1.1.1".to_string(),
                    ..Default::default()
                }]),
                ..Default::default()
            },
        ]),
        ..Default::default()
    };

    assert_eq!(current_addresses(&endpoints), set(&["1.1.1.1", "2.2.2.2"]));
}

#[test]
fn test_current_addresses_of_empty_record() {
    assert!(current_addresses(&Endpoints::default()).is_empty());
}
