// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Student handlers.

use axum::{extract::State, Json};
use campus_core::{NewAccount, NewStudent, RecordId, Student};
use serde::Deserialize;
use serde_json::json;

use super::hash_password;
use crate::error::{ApiError, ApiResult, ValidationErrors};
use crate::extractors::{PathId, ValidatedJson};
use crate::response::{AccountCreated, Created, MessageResponse};
use crate::state::AppState;

/// Student creation request body.
#[derive(Debug, Deserialize)]
pub struct CreateStudentRequest {
    /// Login username.
    pub username: Option<String>,
    /// Plain-text password.
    pub password: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Institutional student number.
    pub student_id: Option<String>,
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
    /// Department.
    pub department_id: Option<RecordId>,
}

/// POST /api/students
///
/// Creates the Student-role user and the student record together.
pub async fn create_student(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateStudentRequest>,
) -> ApiResult<Created<AccountCreated>> {
    let mut errors = ValidationErrors::new();
    let username = errors.require("username", request.username);
    let password = errors.require("password", request.password);
    let email = errors.require("email", request.email);
    let student_id = errors.require("student_id", request.student_id);
    let first_name = errors.require("first_name", request.first_name);
    let last_name = errors.require("last_name", request.last_name);
    let department_id = errors.require("department_id", request.department_id);
    let (
        Some(username),
        Some(password),
        Some(email),
        Some(student_id),
        Some(first_name),
        Some(last_name),
        Some(department_id),
    ) = (
        username,
        password,
        email,
        student_id,
        first_name,
        last_name,
        department_id,
    )
    else {
        return Err(errors.into_error());
    };

    let password = hash_password(&state, password).await?;
    let (user, student) = state
        .store()
        .create_student(
            NewAccount {
                username,
                email,
                password,
            },
            NewStudent {
                student_id,
                first_name,
                last_name,
                department_id,
            },
        )
        .await?;

    tracing::info!(user_id = user.id, student_id = student.id, "Student created");

    Ok(Created(AccountCreated {
        message: "Student and user account created successfully".to_string(),
        user_id: user.id,
        student_id: Some(student.id),
        professor_id: None,
    }))
}

/// GET /api/students
pub async fn list_students(State(state): State<AppState>) -> ApiResult<Json<serde_json::Value>> {
    let students = state.store().list_students().await?;
    Ok(Json(json!({ "students": students })))
}

/// GET /api/students/{student_id}
pub async fn get_student(
    State(state): State<AppState>,
    PathId(student_id): PathId,
) -> ApiResult<Json<Student>> {
    state
        .store()
        .find_student(student_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("Student {} not found", student_id)))
}

/// DELETE /api/students/{student_id}
///
/// Removes the student with its registrations, exam results and user.
pub async fn delete_student(
    State(state): State<AppState>,
    PathId(student_id): PathId,
) -> ApiResult<Json<MessageResponse>> {
    state.store().delete_student(student_id).await?;
    tracing::info!(student_id, "Student deleted");

    Ok(Json(MessageResponse::new(
        "Student and associated user account deleted successfully",
    )))
}
