// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Per-operation access guard.
//!
//! The guard runs in front of a single operation's handler:
//!
//! 1. A `Public` policy passes straight through.
//! 2. The bearer token is taken from the `Authorization` header and verified.
//! 3. The identity named by the token is re-read from the store, so a deleted
//!    user is rejected and the current role is the one evaluated.
//! 4. The operation's policy is evaluated against the identity and the
//!    matched path parameters.
//!
//! Any failure short-circuits with an error response; the handler never runs.

use std::collections::HashMap;
use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::{
    body::Body,
    extract::{ConnectInfo, FromRequestParts, Path},
    http::{header, Request},
    response::{IntoResponse, Response},
};
use campus_core::{Identity, Store};
use tower::{Layer, Service};

use crate::auth::{AuthContext, Decision, Policy, TokenError, TokenService};
use crate::error::{ApiError, ApiResult};

// =============================================================================
// AccessGuardLayer
// =============================================================================

/// Layer enforcing one operation's [`Policy`].
#[derive(Clone)]
pub struct AccessGuardLayer {
    operation: &'static str,
    policy: Arc<Policy>,
    tokens: Arc<TokenService>,
    store: Arc<dyn Store>,
}

impl AccessGuardLayer {
    /// Creates a guard for the named operation.
    pub fn new(
        operation: &'static str,
        policy: Policy,
        tokens: Arc<TokenService>,
        store: Arc<dyn Store>,
    ) -> Self {
        Self {
            operation,
            policy: Arc::new(policy),
            tokens,
            store,
        }
    }
}

impl<S> Layer<S> for AccessGuardLayer {
    type Service = AccessGuard<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AccessGuard {
            inner,
            operation: self.operation,
            policy: self.policy.clone(),
            tokens: self.tokens.clone(),
            store: self.store.clone(),
        }
    }
}

// =============================================================================
// AccessGuard
// =============================================================================

/// Middleware enforcing one operation's [`Policy`].
#[derive(Clone)]
pub struct AccessGuard<S> {
    inner: S,
    operation: &'static str,
    policy: Arc<Policy>,
    tokens: Arc<TokenService>,
    store: Arc<dyn Store>,
}

impl<S> Service<Request<Body>> for AccessGuard<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let operation = self.operation;
        let policy = self.policy.clone();
        let tokens = self.tokens.clone();
        let store = self.store.clone();
        let mut inner = self.inner.clone();

        Box::pin(async move {
            if !policy.requires_auth() {
                return inner.call(req).await;
            }

            match authorize(operation, &policy, &tokens, store.as_ref(), req).await {
                Ok(req) => inner.call(req).await,
                Err(err) => Ok(err.into_response()),
            }
        })
    }
}

/// Runs the guard and returns the request with an [`AuthContext`] attached.
async fn authorize(
    operation: &'static str,
    policy: &Policy,
    tokens: &TokenService,
    store: &dyn Store,
    req: Request<Body>,
) -> ApiResult<Request<Body>> {
    let token = extract_bearer_token(&req);
    let identity = authenticate(tokens, store, token).await?;

    let (mut parts, body) = req.into_parts();
    let params = match policy {
        Policy::SelfOrRoles { .. } => {
            Path::<HashMap<String, String>>::from_request_parts(&mut parts, &())
                .await
                .map(|Path(params)| params)
                .map_err(|e| ApiError::validation(format!("Invalid path parameters: {}", e)))?
        }
        _ => HashMap::new(),
    };

    if let Decision::Deny { reason } = policy.evaluate(&identity, &params, store).await? {
        tracing::warn!(
            user_id = identity.id,
            role = %identity.role,
            operation = operation,
            reason = %reason,
            "Access denied"
        );
        return Err(ApiError::forbidden("Access forbidden"));
    }

    let mut ctx = AuthContext::new(identity);
    if let Some(ConnectInfo(addr)) = parts.extensions.get::<ConnectInfo<SocketAddr>>() {
        ctx = ctx.with_client_ip(addr.ip());
    }
    tracing::debug!(
        user_id = ctx.user_id(),
        request_id = %ctx.request_id,
        operation = operation,
        "Access granted"
    );
    parts.extensions.insert(ctx);

    Ok(Request::from_parts(parts, body))
}

/// Verifies the bearer token and resolves the caller's current identity.
async fn authenticate(
    tokens: &TokenService,
    store: &dyn Store,
    token: Result<String, TokenError>,
) -> ApiResult<Identity> {
    let token = token.map_err(|e| {
        tracing::debug!(error = %e, "No usable authorization token");
        ApiError::from(e)
    })?;

    let claims = tokens.verify(&token).map_err(|e| {
        tracing::debug!(error = %e, "Token validation failed");
        ApiError::from(e)
    })?;

    match store.find_identity(claims.id).await? {
        Some(identity) => Ok(identity),
        None => {
            tracing::debug!(user_id = claims.id, "Token names an unknown user");
            Err(TokenError::Invalid.into())
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Extracts the bearer token from the Authorization header.
///
/// No header, or the `Bearer` scheme with nothing after it, is
/// [`TokenError::Missing`]. Any other scheme or an unreadable header is
/// [`TokenError::Invalid`]. The scheme is matched case-insensitively.
pub(crate) fn extract_bearer_token<B>(req: &Request<B>) -> Result<String, TokenError> {
    let Some(value) = req.headers().get(header::AUTHORIZATION) else {
        return Err(TokenError::Missing);
    };
    let value = value.to_str().map_err(|_| TokenError::Invalid)?.trim();

    let (scheme, token) = value.split_once(' ').unwrap_or((value, ""));
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return Err(TokenError::Invalid);
    }

    match token.trim() {
        "" => Err(TokenError::Missing),
        token => Ok(token.to_string()),
    }
}

// =============================================================================
// Tests
// =============================================================================
