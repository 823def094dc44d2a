// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Authentication context.

use std::net::IpAddr;

use campus_core::{Identity, RecordId, RoleName};
use serde::Serialize;
use uuid::Uuid;

/// Authentication context for a request.
///
/// Attached to the request extensions by the access guard once the caller's
/// token is verified and their identity freshly resolved from the store.
#[derive(Debug, Clone, Serialize)]
pub struct AuthContext {
    /// The caller as currently stored.
    pub identity: Identity,
    /// Request ID for tracing.
    pub request_id: Uuid,
    /// Client IP address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_ip: Option<IpAddr>,
}

impl AuthContext {
    /// Creates a context for the identity with a fresh request id.
    pub fn new(identity: Identity) -> Self {
        Self {
            identity,
            request_id: Uuid::now_v7(),
            client_ip: None,
        }
    }

    /// Sets the client IP address.
    pub fn with_client_ip(mut self, ip: IpAddr) -> Self {
        self.client_ip = Some(ip);
        self
    }

    /// Sets the request ID.
    pub fn with_request_id(mut self, request_id: Uuid) -> Self {
        self.request_id = request_id;
        self
    }

    /// The caller's user id.
    pub fn user_id(&self) -> RecordId {
        self.identity.id
    }

    /// The caller's current role.
    pub fn role(&self) -> RoleName {
        self.identity.role
    }
}
