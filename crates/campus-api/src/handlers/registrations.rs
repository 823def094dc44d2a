// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Course registration handlers.

use axum::{extract::State, Json};
use campus_core::RecordId;
use serde::Deserialize;
use serde_json::json;

use crate::error::{ApiResult, ValidationErrors};
use crate::extractors::ValidatedJson;
use crate::response::{created_record, Created};
use crate::state::AppState;

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct CreateRegistrationRequest {
    /// Student record id.
    pub student_id: Option<RecordId>,
    /// Course id.
    pub course_id: Option<RecordId>,
}

/// POST /api/registrations
pub async fn create_registration(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateRegistrationRequest>,
) -> ApiResult<Created<serde_json::Value>> {
    let mut errors = ValidationErrors::new();
    let student_id = errors.require("student_id", request.student_id);
    let course_id = errors.require("course_id", request.course_id);
    let (Some(student_id), Some(course_id)) = (student_id, course_id) else {
        return Err(errors.into_error());
    };

    let registration = state
        .store()
        .create_registration(student_id, course_id)
        .await?;
    tracing::info!(
        registration_id = registration.id,
        student_id,
        course_id,
        "Student registered"
    );

    Ok(created_record(
        "Course registration created successfully",
        "registration_id",
        registration.id,
    ))
}

/// GET /api/registrations
pub async fn list_registrations(
    State(state): State<AppState>,
) -> ApiResult<Json<serde_json::Value>> {
    let registrations = state.store().list_registrations().await?;
    Ok(Json(json!({ "registrations": registrations })))
}
