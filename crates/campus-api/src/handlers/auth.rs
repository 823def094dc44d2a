// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Authentication handlers.

use axum::{extract::State, Json};
use campus_core::RoleName;
use serde::Deserialize;

use super::verify_password;
use crate::error::{ApiError, ApiResult, ValidationErrors};
use crate::extractors::{Auth, ValidatedJson};
use crate::response::{LoginResponse, MessageResponse, ProfileResponse};
use crate::state::AppState;

// =============================================================================
// Login
// =============================================================================

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Username.
    pub username: Option<String>,
    /// Password.
    pub password: Option<String>,
}

/// POST /api/login
///
/// Verifies the credentials and returns a session token. Unknown users and
/// wrong passwords produce the same error.
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let mut errors = ValidationErrors::new();
    let username = errors.require("username", request.username);
    let password = errors.require("password", request.password);
    let (Some(username), Some(password)) = (username, password) else {
        return Err(errors.into_error());
    };

    let user = state.store().find_user_by_username(&username).await?;
    let stored = user.as_ref().map(|u| u.password.clone());
    let verified = verify_password(&state, stored, password).await?;

    let Some(user) = user.filter(|_| verified) else {
        tracing::info!(username = %username, "Login failed");
        return Err(ApiError::InvalidCredentials);
    };

    let identity = state
        .store()
        .find_identity(user.id)
        .await?
        .ok_or_else(|| ApiError::internal(format!("User {} has no resolvable role", user.id)))?;
    let token = state.tokens().issue(&identity)?;

    tracing::info!(user_id = identity.id, role = %identity.role, "User logged in");

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token,
    }))
}

// =============================================================================
// Protected
// =============================================================================

/// GET /api/protected
///
/// Greets the authenticated caller.
pub async fn protected(Auth(ctx): Auth) -> Json<MessageResponse> {
    let identity = &ctx.identity;
    Json(MessageResponse::new(format!(
        "Hello, {}! Your ID is {} and you have a role_id of {}. This is a protected route.",
        identity.username, identity.id, identity.role_id
    )))
}

// =============================================================================
// Current Profile
// =============================================================================

/// GET /api/me
///
/// Returns the caller's identity and, for students and professors, the
/// linked record.
pub async fn current_profile(
    State(state): State<AppState>,
    Auth(ctx): Auth,
) -> ApiResult<Json<ProfileResponse>> {
    let user_id = ctx.user_id();
    let mut profile = ProfileResponse::new(ctx.identity);

    match profile.role {
        RoleName::Admin => {}
        RoleName::Student => {
            let student = state
                .store()
                .find_student_by_user(user_id)
                .await?
                .ok_or_else(|| ApiError::not_found("No student record is linked to this account"))?;
            profile.student = Some(student);
        }
        RoleName::Professor => {
            let professor = state
                .store()
                .find_professor_by_user(user_id)
                .await?
                .ok_or_else(|| {
                    ApiError::not_found("No professor record is linked to this account")
                })?;
            profile.professor = Some(professor);
        }
    }

    Ok(Json(profile))
}
