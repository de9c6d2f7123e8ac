// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Persistence capability for the advertised `Endpoints` record.
//!
//! The reconciler talks to the cluster datastore through the narrow
//! [`EndpointsStore`] trait: read the latest record, create it, or patch its
//! subsets. The production implementation wraps a kube [`Api<Endpoints>`];
//! any mock implementing the same contract is substitutable for tests.
//!
//! The patch form is a merge patch containing only the `subsets` field, so
//! identity, labels and resourceVersion are never touched by an update.
//! No retry happens at this layer.

use crate::errors::StoreError;
use async_trait::async_trait;
use k8s_openapi::api::core::v1::{EndpointSubset, Endpoints};
use kube::api::{Patch, PatchParams, PostParams};
use kube::Api;
use serde_json::json;

/// Read/write access to a single named `Endpoints` record.
#[async_trait]
pub trait EndpointsStore: Send + Sync {
    /// Fetch the latest version of the record, or `None` if it does not
    /// exist. "Not found" is an expected condition, not an error: it is the
    /// trigger for the create path.
    async fn get(&self, name: &str) -> Result<Option<Endpoints>, StoreError>;

    /// Create the record.
    async fn create(&self, endpoints: &Endpoints) -> Result<(), StoreError>;

    /// Replace only the `subsets` field of the existing record.
    async fn patch_subsets(
        &self,
        name: &str,
        subsets: &[EndpointSubset],
    ) -> Result<(), StoreError>;
}

/// [`EndpointsStore`] backed by the Kubernetes API server.
pub struct KubeEndpointsStore {
    api: Api<Endpoints>,
    namespace: String,
}

impl KubeEndpointsStore {
    /// Wrap a namespaced `Endpoints` API handle.
    #[must_use]
    pub fn new(api: Api<Endpoints>, namespace: impl Into<String>) -> Self {
        Self {
            api,
            namespace: namespace.into(),
        }
    }

    fn classify(&self, err: kube::Error, name: &str) -> StoreError {
        match err {
            kube::Error::Api(api_err) if api_err.code == 409 => StoreError::Conflict {
                name: name.to_string(),
                namespace: self.namespace.clone(),
                reason: api_err.message,
            },
            other => StoreError::Api(other),
        }
    }
}

#[async_trait]
impl EndpointsStore for KubeEndpointsStore {
    async fn get(&self, name: &str) -> Result<Option<Endpoints>, StoreError> {
        self.api.get_opt(name).await.map_err(StoreError::Api)
    }

    async fn create(&self, endpoints: &Endpoints) -> Result<(), StoreError> {
        let name = endpoints.metadata.name.clone().unwrap_or_default();
        self.api
            .create(&PostParams::default(), endpoints)
            .await
            .map(|_| ())
            .map_err(|err| self.classify(err, &name))
    }

    async fn patch_subsets(
        &self,
        name: &str,
        subsets: &[EndpointSubset],
    ) -> Result<(), StoreError> {
        let patch = json!({ "subsets": subsets });
        self.api
            .patch(name, &PatchParams::default(), &Patch::Merge(&patch))
            .await
            .map(|_| ())
            .map_err(|err| self.classify(err, name))
    }
}
