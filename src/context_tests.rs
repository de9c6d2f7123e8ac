// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `context.rs`

use crate::context::EndpointIdentity;

#[test]
fn test_endpoint_identity_display() {
    let identity = EndpointIdentity {
        name: "kubernetes".to_string(),
        namespace: "default".to_string(),
    };

    assert_eq!(identity.to_string(), "default/kubernetes");
}
