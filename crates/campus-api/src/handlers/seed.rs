// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Demo data seeding handler.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use campus_core::seed::{self, DemoPasswords, SeedOutcome};

use crate::error::{ApiError, ApiResult};
use crate::response::MessageResponse;
use crate::state::AppState;

/// POST /api/seed_data
///
/// Creates one linked record of every kind unless departments and users
/// already exist. Returns 201 when data was added and 200 otherwise.
pub async fn seed_data(State(state): State<AppState>) -> ApiResult<Response> {
    let Some(password) = state.config.demo_password.clone() else {
        return Err(ApiError::bad_request(
            "Demo data is not configured: set bootstrap.demo_password",
        ));
    };

    if seed::demo_data_present(state.store()).await? {
        return Ok(already_present());
    }

    let credentials = state.credentials.clone();
    let passwords =
        tokio::task::spawn_blocking(move || DemoPasswords::hash(&credentials, &password))
            .await
            .map_err(|e| ApiError::internal(format!("Password hashing task failed: {}", e)))??;

    match seed::seed_demo_data(state.store(), passwords).await? {
        SeedOutcome::Created(records) => {
            tracing::info!(
                department_id = records.department.id,
                course_id = records.course.id,
                "Demo data created"
            );
            Ok((
                StatusCode::CREATED,
                Json(MessageResponse::new("All essential data created successfully.")),
            )
                .into_response())
        }
        SeedOutcome::AlreadyPresent => Ok(already_present()),
    }
}

fn already_present() -> Response {
    Json(MessageResponse::new(
        "Initial data already exists. No new data added.",
    ))
    .into_response()
}
