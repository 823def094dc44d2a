// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Professor handlers.

use axum::{extract::State, Json};
use campus_core::{NewAccount, NewProfessor, Professor, RecordId};
use serde::Deserialize;
use serde_json::json;

use super::{hash_password, non_blank};
use crate::error::{ApiError, ApiResult, ValidationErrors};
use crate::extractors::{PathId, ValidatedJson};
use crate::response::{AccountCreated, Created, MessageResponse};
use crate::state::AppState;

/// Professor creation request body.
#[derive(Debug, Deserialize)]
pub struct CreateProfessorRequest {
    /// Login username.
    pub username: Option<String>,
    /// Plain-text password.
    pub password: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
    /// Academic title.
    pub title: Option<String>,
    /// Department.
    pub department_id: Option<RecordId>,
}

/// POST /api/professors
///
/// Creates the Professor-role user and the professor record together.
pub async fn create_professor(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateProfessorRequest>,
) -> ApiResult<Created<AccountCreated>> {
    let mut errors = ValidationErrors::new();
    let username = errors.require("username", request.username);
    let password = errors.require("password", request.password);
    let email = errors.require("email", request.email);
    let first_name = errors.require("first_name", request.first_name);
    let last_name = errors.require("last_name", request.last_name);
    let department_id = errors.require("department_id", request.department_id);
    let (
        Some(username),
        Some(password),
        Some(email),
        Some(first_name),
        Some(last_name),
        Some(department_id),
    ) = (username, password, email, first_name, last_name, department_id)
    else {
        return Err(errors.into_error());
    };

    let password = hash_password(&state, password).await?;
    let (user, professor) = state
        .store()
        .create_professor(
            NewAccount {
                username,
                email,
                password,
            },
            NewProfessor {
                first_name,
                last_name,
                title: non_blank(request.title),
                department_id,
            },
        )
        .await?;

    tracing::info!(user_id = user.id, professor_id = professor.id, "Professor created");

    Ok(Created(AccountCreated {
        message: "Professor and user account created successfully".to_string(),
        user_id: user.id,
        student_id: None,
        professor_id: Some(professor.id),
    }))
}

/// GET /api/professors
pub async fn list_professors(State(state): State<AppState>) -> ApiResult<Json<serde_json::Value>> {
    let professors = state.store().list_professors().await?;
    Ok(Json(json!({ "professors": professors })))
}

/// GET /api/professors/{professor_id}
pub async fn get_professor(
    State(state): State<AppState>,
    PathId(professor_id): PathId,
) -> ApiResult<Json<Professor>> {
    state
        .store()
        .find_professor(professor_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("Professor {} not found", professor_id)))
}

/// DELETE /api/professors/{professor_id}
///
/// Removes the professor and its user; their courses become unassigned.
pub async fn delete_professor(
    State(state): State<AppState>,
    PathId(professor_id): PathId,
) -> ApiResult<Json<MessageResponse>> {
    state.store().delete_professor(professor_id).await?;
    tracing::info!(professor_id, "Professor deleted");

    Ok(Json(MessageResponse::new(
        "Professor and associated user account deleted successfully",
    )))
}
