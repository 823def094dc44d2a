// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! User account handlers.

use axum::{extract::State, Json};
use campus_core::{NewUser, RecordId, UserUpdate};
use serde::Deserialize;

use super::{hash_password, non_blank};
use crate::error::{ApiError, ApiResult, ValidationErrors};
use crate::extractors::{PathId, ValidatedJson};
use crate::response::{Created, MessageResponse, UserCreated, UserDetail, UserList, UserSummary};
use crate::state::AppState;

// =============================================================================
// List / Get
// =============================================================================

/// GET /api/users
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<UserList>> {
    let users = state.store().list_users().await?;
    Ok(Json(UserList {
        users: users.iter().map(UserSummary::from).collect(),
    }))
}

/// GET /api/users/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    PathId(user_id): PathId,
) -> ApiResult<Json<UserDetail>> {
    let identity = state
        .store()
        .find_identity(user_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User {} not found", user_id)))?;

    Ok(Json(UserDetail::from(identity)))
}

// =============================================================================
// Create
// =============================================================================

/// User creation request body.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    /// Username.
    pub username: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Plain-text password.
    pub password: Option<String>,
    /// Role id.
    pub role_id: Option<RecordId>,
}

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> ApiResult<Created<UserCreated>> {
    let mut errors = ValidationErrors::new();
    let username = errors.require("username", request.username);
    let email = errors.require("email", request.email);
    let password = errors.require("password", request.password);
    let role_id = errors.require("role_id", request.role_id);
    let (Some(username), Some(email), Some(password), Some(role_id)) =
        (username, email, password, role_id)
    else {
        return Err(errors.into_error());
    };

    let role = state
        .store()
        .find_role(role_id)
        .await?
        .ok_or_else(|| ApiError::validation(format!("Unknown role_id {}", role_id)))?;

    let password = hash_password(&state, password).await?;
    let user = state
        .store()
        .create_user(NewUser {
            username,
            email,
            role_id: role.id,
            password,
        })
        .await?;

    tracing::info!(user_id = user.id, role = %role.name, "User created");

    Ok(Created(UserCreated {
        message: "User created successfully".to_string(),
        user_id: user.id,
        username: user.username,
        role_name: role.name,
    }))
}

// =============================================================================
// Update
// =============================================================================

/// User update request body. Every field is optional.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    /// New username.
    pub username: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New plain-text password.
    pub password: Option<String>,
}

/// PUT /api/users/{user_id}
///
/// Applies a partial update. Blank fields are ignored; a request that
/// changes nothing is rejected.
pub async fn update_user(
    State(state): State<AppState>,
    PathId(user_id): PathId,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let mut update = UserUpdate {
        username: non_blank(request.username),
        email: non_blank(request.email),
        password: None,
    };
    if let Some(password) = non_blank(request.password) {
        update.password = Some(hash_password(&state, password).await?);
    }

    if update.is_empty() {
        return Err(ApiError::validation(
            "At least one of username, email or password is required",
        ));
    }

    state.store().update_user(user_id, update).await?;
    tracing::info!(user_id, "User updated");

    Ok(Json(MessageResponse::new("User updated successfully")))
}

// =============================================================================
// Delete
// =============================================================================

/// DELETE /api/users/{user_id}
///
/// Users linked to a student or professor record must be removed through
/// that record.
pub async fn delete_user(
    State(state): State<AppState>,
    PathId(user_id): PathId,
) -> ApiResult<Json<MessageResponse>> {
    state.store().delete_user(user_id).await?;
    tracing::info!(user_id, "User deleted");

    Ok(Json(MessageResponse::new("User deleted successfully")))
}
