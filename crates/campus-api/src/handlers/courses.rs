// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Course handlers.

use axum::{extract::State, Json};
use campus_core::{NewCourse, RecordId};
use serde::Deserialize;
use serde_json::json;

use crate::error::{ApiResult, ValidationErrors};
use crate::extractors::{PathId, ValidatedJson};
use crate::response::{created_record, Created, MessageResponse};
use crate::state::AppState;

/// Course creation request body.
#[derive(Debug, Deserialize)]
pub struct CreateCourseRequest {
    /// Unique course code.
    pub course_code: Option<String>,
    /// Course name.
    pub course_name: Option<String>,
    /// Credit count, positive.
    pub credits: Option<i32>,
    /// Owning department.
    pub department_id: Option<RecordId>,
    /// Assigned professor record, if any.
    pub professor_id: Option<RecordId>,
}

/// GET /api/courses
pub async fn list_courses(State(state): State<AppState>) -> ApiResult<Json<serde_json::Value>> {
    let courses = state.store().list_courses().await?;
    Ok(Json(json!({ "courses": courses })))
}

/// POST /api/courses
pub async fn create_course(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateCourseRequest>,
) -> ApiResult<Created<serde_json::Value>> {
    let mut errors = ValidationErrors::new();
    let course_code = errors.require("course_code", request.course_code);
    let course_name = errors.require("course_name", request.course_name);
    let credits = errors.require("credits", request.credits);
    let department_id = errors.require("department_id", request.department_id);
    if matches!(credits, Some(c) if c <= 0) {
        errors.add("credits", "must be positive");
    }
    let (Some(course_code), Some(course_name), Some(credits), Some(department_id), true) = (
        course_code,
        course_name,
        credits,
        department_id,
        errors.is_empty(),
    ) else {
        return Err(errors.into_error());
    };

    let course = state
        .store()
        .create_course(NewCourse {
            course_code,
            course_name,
            credits,
            department_id,
            professor_id: request.professor_id,
        })
        .await?;
    tracing::info!(course_id = course.id, code = %course.course_code, "Course created");

    Ok(created_record("Course created successfully", "course_id", course.id))
}

/// DELETE /api/courses/{course_id}
///
/// Registrations, exams, exam results and course announcements go with it.
pub async fn delete_course(
    State(state): State<AppState>,
    PathId(course_id): PathId,
) -> ApiResult<Json<MessageResponse>> {
    state.store().delete_course(course_id).await?;
    tracing::info!(course_id, "Course deleted");

    Ok(Json(MessageResponse::new("Course deleted successfully")))
}
