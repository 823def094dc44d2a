// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Welcome and health check handlers.

use axum::{response::IntoResponse, Json};

use crate::response::HealthResponse;

/// GET /
pub async fn welcome() -> &'static str {
    "Welcome to the Campus Records API"
}

/// GET /health
///
/// Simple liveness check. Returns 200 OK if the service is running.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse::healthy())
}
