// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Event notification sink for successful endpoint writes.
//!
//! Events are observability only: a failed publish is logged and swallowed,
//! never surfaced to the reconcile pass. The production sink publishes a
//! Kubernetes event through the kube runtime recorder; tests substitute a
//! recording fake.

use crate::constants::{ACTION_READVERTISE, CONTROLLER_NAME, REASON_SYNCED};
use crate::context::EndpointIdentity;
use async_trait::async_trait;
use k8s_openapi::api::core::v1::ObjectReference;
use kube::runtime::events::{Event, EventType, Recorder, Reporter};
use kube::Client;
use tracing::warn;

/// Fire-and-forget notification of a successful create/update.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Report that the endpoint record was synced, with a human-readable
    /// summary of the write.
    async fn synced(&self, endpoint: &EndpointIdentity, summary: &str);
}

/// [`EventSink`] publishing Kubernetes events on the endpoint record.
pub struct KubeEventSink {
    recorder: Recorder,
}

impl KubeEventSink {
    /// Build a sink that reports events as the readvertiser controller.
    #[must_use]
    pub fn new(client: Client) -> Self {
        let reporter = Reporter {
            controller: CONTROLLER_NAME.to_string(),
            instance: None,
        };
        Self {
            recorder: Recorder::new(client, reporter),
        }
    }
}

#[async_trait]
impl EventSink for KubeEventSink {
    async fn synced(&self, endpoint: &EndpointIdentity, summary: &str) {
        let reference = ObjectReference {
            api_version: Some("v1".to_string()),
            kind: Some("Endpoints".to_string()),
            name: Some(endpoint.name.clone()),
            namespace: Some(endpoint.namespace.clone()),
            ..Default::default()
        };

        let event = Event {
            type_: EventType::Normal,
            reason: REASON_SYNCED.to_string(),
            note: Some(summary.to_string()),
            action: ACTION_READVERTISE.to_string(),
            secondary: None,
        };

        if let Err(err) = self.recorder.publish(&event, &reference).await {
            warn!(endpoint = %endpoint, error = %err, "failed to publish sync event");
        }
    }
}
